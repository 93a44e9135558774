pub type Opcode = u8;

/// Static description of one opcode: what it does, how it finds its operand
/// and what it costs before any dynamic penalties.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub name: &'static str,
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
    pub class: OpcodeClass,
    pub cycles: u8,
}

impl Instruction {
    /// Instruction length in bytes, opcode included
    pub fn bytes(&self) -> u8 {
        match self.class {
            // jammed processor only fetched the opcode
            OpcodeClass::Halt => 1,
            _ => 1 + self.addressing_mode.operand_bytes(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpcodeClass {
    Official,
    Unofficial,
    Halt,
    Unstable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,     // Implied Addressing
    Accumulator, // Accumulator Addressing
    Immediate,   // Immediate Addressing
    Absolute,    // Absoulute Addressing
    ZeroPage,    // Zero Page Addressing
    AbsoluteX,   // Absoulute Indexed Addressing (X)
    AbsoluteY,   // Absoulute Indexed Addressing (Y)
    ZeroPageX,   // Zero Page Indexed Addressing (X)
    ZeroPageY,   // Zero Page Indexed Addressing (Y)
    IndirectX,   // Zero Page Indexed Indirect Addressing (X)
    IndirectY,   // Zero Page Indexed Indirect Addressing (Y)
    Relative,    // Relative Addressing (branch operations)
    Indirect,    // Indirect Addressing (jump operations)
}

impl AddressingMode {
    pub fn operand_bytes(&self) -> u8 {
        use AddressingMode::*;

        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}

/// Every operation the processor knows, official ones first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    // Transfer
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Decrements and increments
    Dec,
    Dex,
    Dey,
    Inc,
    Inx,
    Iny,
    // Arithmetic
    Adc,
    Sbc,
    // Logic
    And,
    Eor,
    Ora,
    // Shift and rotate
    Asl,
    Lsr,
    Rol,
    Ror,
    // Flags
    Clc,
    Cld,
    Cli,
    Clv,
    Sec,
    Sed,
    Sei,
    // Comparisons
    Cmp,
    Cpx,
    Cpy,
    // Conditional branch
    Bcc,
    Bcs,
    Beq,
    Bmi,
    Bne,
    Bpl,
    Bvc,
    Bvs,
    // Jumps and subroutines
    Jmp,
    Jsr,
    Rts,
    // Interrupts
    Brk,
    Rti,
    // Other
    Bit,
    Nop,

    // Unofficial, composed of the official primitives
    Slo,
    Rla,
    Sre,
    Rra,
    Sax,
    Lax,
    Dcp,
    Isc,
    Anc,
    Alr,
    Arr,
    Xaa,
    Lxa,
    Sbx,
    Las,

    // Processor locks up
    Jam,
    // Behaviour depends on analog bus effects, not emulated
    Unstable,
}
