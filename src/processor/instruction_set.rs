//! MOS 6502 opcode table
//!
//! Every one of the 256 opcode bytes maps to a descriptor, unofficial and
//! halting opcodes included, so decoding can never fail.

use once_cell::sync::Lazy;

use crate::processor::instruction::{AddressingMode, Instruction, Opcode, OpcodeClass, Operation};

pub static INSTRUCTION_SET: Lazy<InstructionSet> = Lazy::new(InstructionSet::new);

pub struct InstructionSet {
    instructions: [Instruction; 256],
}

macro_rules! instruction {
    ($opcode:expr, $name:expr, $operation:ident, $addressing_mode:ident, $class:ident, $cycles:expr) => {
        Instruction {
            opcode: $opcode,
            name: $name,
            operation: Operation::$operation,
            addressing_mode: AddressingMode::$addressing_mode,
            class: OpcodeClass::$class,
            cycles: $cycles,
        }
    };
}

impl InstructionSet {
    #[rustfmt::skip]
    pub fn new() -> Self {
        let table = [
            // Transfer instructions
            instruction!(0xA9, "LDA", Lda, Immediate, Official, 2),
            instruction!(0xA5, "LDA", Lda, ZeroPage, Official, 3),
            instruction!(0xB5, "LDA", Lda, ZeroPageX, Official, 4),
            instruction!(0xAD, "LDA", Lda, Absolute, Official, 4),
            instruction!(0xBD, "LDA", Lda, AbsoluteX, Official, 4),
            instruction!(0xB9, "LDA", Lda, AbsoluteY, Official, 4),
            instruction!(0xA1, "LDA", Lda, IndirectX, Official, 6),
            instruction!(0xB1, "LDA", Lda, IndirectY, Official, 5),
            instruction!(0xA2, "LDX", Ldx, Immediate, Official, 2),
            instruction!(0xA6, "LDX", Ldx, ZeroPage, Official, 3),
            instruction!(0xB6, "LDX", Ldx, ZeroPageY, Official, 4),
            instruction!(0xAE, "LDX", Ldx, Absolute, Official, 4),
            instruction!(0xBE, "LDX", Ldx, AbsoluteY, Official, 4),
            instruction!(0xA0, "LDY", Ldy, Immediate, Official, 2),
            instruction!(0xA4, "LDY", Ldy, ZeroPage, Official, 3),
            instruction!(0xB4, "LDY", Ldy, ZeroPageX, Official, 4),
            instruction!(0xAC, "LDY", Ldy, Absolute, Official, 4),
            instruction!(0xBC, "LDY", Ldy, AbsoluteX, Official, 4),
            instruction!(0x85, "STA", Sta, ZeroPage, Official, 3),
            instruction!(0x95, "STA", Sta, ZeroPageX, Official, 4),
            instruction!(0x8D, "STA", Sta, Absolute, Official, 4),
            instruction!(0x9D, "STA", Sta, AbsoluteX, Official, 5),
            instruction!(0x99, "STA", Sta, AbsoluteY, Official, 5),
            instruction!(0x81, "STA", Sta, IndirectX, Official, 6),
            instruction!(0x91, "STA", Sta, IndirectY, Official, 6),
            instruction!(0x86, "STX", Stx, ZeroPage, Official, 3),
            instruction!(0x96, "STX", Stx, ZeroPageY, Official, 4),
            instruction!(0x8E, "STX", Stx, Absolute, Official, 4),
            instruction!(0x84, "STY", Sty, ZeroPage, Official, 3),
            instruction!(0x94, "STY", Sty, ZeroPageX, Official, 4),
            instruction!(0x8C, "STY", Sty, Absolute, Official, 4),
            instruction!(0xAA, "TAX", Tax, Implied, Official, 2),
            instruction!(0xA8, "TAY", Tay, Implied, Official, 2),
            instruction!(0xBA, "TSX", Tsx, Implied, Official, 2),
            instruction!(0x8A, "TXA", Txa, Implied, Official, 2),
            instruction!(0x9A, "TXS", Txs, Implied, Official, 2),
            instruction!(0x98, "TYA", Tya, Implied, Official, 2),

            // Stack instructions
            instruction!(0x48, "PHA", Pha, Implied, Official, 3),
            instruction!(0x08, "PHP", Php, Implied, Official, 3),
            instruction!(0x68, "PLA", Pla, Implied, Official, 4),
            instruction!(0x28, "PLP", Plp, Implied, Official, 4),

            // Decrements and increments
            instruction!(0xC6, "DEC", Dec, ZeroPage, Official, 5),
            instruction!(0xD6, "DEC", Dec, ZeroPageX, Official, 6),
            instruction!(0xCE, "DEC", Dec, Absolute, Official, 6),
            instruction!(0xDE, "DEC", Dec, AbsoluteX, Official, 7),
            instruction!(0xCA, "DEX", Dex, Implied, Official, 2),
            instruction!(0x88, "DEY", Dey, Implied, Official, 2),
            instruction!(0xE6, "INC", Inc, ZeroPage, Official, 5),
            instruction!(0xF6, "INC", Inc, ZeroPageX, Official, 6),
            instruction!(0xEE, "INC", Inc, Absolute, Official, 6),
            instruction!(0xFE, "INC", Inc, AbsoluteX, Official, 7),
            instruction!(0xE8, "INX", Inx, Implied, Official, 2),
            instruction!(0xC8, "INY", Iny, Implied, Official, 2),

            // Arithmetic operations
            instruction!(0x69, "ADC", Adc, Immediate, Official, 2),
            instruction!(0x65, "ADC", Adc, ZeroPage, Official, 3),
            instruction!(0x75, "ADC", Adc, ZeroPageX, Official, 4),
            instruction!(0x6D, "ADC", Adc, Absolute, Official, 4),
            instruction!(0x7D, "ADC", Adc, AbsoluteX, Official, 4),
            instruction!(0x79, "ADC", Adc, AbsoluteY, Official, 4),
            instruction!(0x61, "ADC", Adc, IndirectX, Official, 6),
            instruction!(0x71, "ADC", Adc, IndirectY, Official, 5),
            instruction!(0xE9, "SBC", Sbc, Immediate, Official, 2),
            instruction!(0xE5, "SBC", Sbc, ZeroPage, Official, 3),
            instruction!(0xF5, "SBC", Sbc, ZeroPageX, Official, 4),
            instruction!(0xED, "SBC", Sbc, Absolute, Official, 4),
            instruction!(0xFD, "SBC", Sbc, AbsoluteX, Official, 4),
            instruction!(0xF9, "SBC", Sbc, AbsoluteY, Official, 4),
            instruction!(0xE1, "SBC", Sbc, IndirectX, Official, 6),
            instruction!(0xF1, "SBC", Sbc, IndirectY, Official, 5),
            instruction!(0xEB, "SBC", Sbc, Immediate, Unofficial, 2),

            // Logical operations
            instruction!(0x29, "AND", And, Immediate, Official, 2),
            instruction!(0x25, "AND", And, ZeroPage, Official, 3),
            instruction!(0x35, "AND", And, ZeroPageX, Official, 4),
            instruction!(0x2D, "AND", And, Absolute, Official, 4),
            instruction!(0x3D, "AND", And, AbsoluteX, Official, 4),
            instruction!(0x39, "AND", And, AbsoluteY, Official, 4),
            instruction!(0x21, "AND", And, IndirectX, Official, 6),
            instruction!(0x31, "AND", And, IndirectY, Official, 5),
            instruction!(0x49, "EOR", Eor, Immediate, Official, 2),
            instruction!(0x45, "EOR", Eor, ZeroPage, Official, 3),
            instruction!(0x55, "EOR", Eor, ZeroPageX, Official, 4),
            instruction!(0x4D, "EOR", Eor, Absolute, Official, 4),
            instruction!(0x5D, "EOR", Eor, AbsoluteX, Official, 4),
            instruction!(0x59, "EOR", Eor, AbsoluteY, Official, 4),
            instruction!(0x41, "EOR", Eor, IndirectX, Official, 6),
            instruction!(0x51, "EOR", Eor, IndirectY, Official, 5),
            instruction!(0x09, "ORA", Ora, Immediate, Official, 2),
            instruction!(0x05, "ORA", Ora, ZeroPage, Official, 3),
            instruction!(0x15, "ORA", Ora, ZeroPageX, Official, 4),
            instruction!(0x0D, "ORA", Ora, Absolute, Official, 4),
            instruction!(0x1D, "ORA", Ora, AbsoluteX, Official, 4),
            instruction!(0x19, "ORA", Ora, AbsoluteY, Official, 4),
            instruction!(0x01, "ORA", Ora, IndirectX, Official, 6),
            instruction!(0x11, "ORA", Ora, IndirectY, Official, 5),

            // Shift and rotate instructions
            instruction!(0x0A, "ASL", Asl, Accumulator, Official, 2),
            instruction!(0x06, "ASL", Asl, ZeroPage, Official, 5),
            instruction!(0x16, "ASL", Asl, ZeroPageX, Official, 6),
            instruction!(0x0E, "ASL", Asl, Absolute, Official, 6),
            instruction!(0x1E, "ASL", Asl, AbsoluteX, Official, 7),
            instruction!(0x4A, "LSR", Lsr, Accumulator, Official, 2),
            instruction!(0x46, "LSR", Lsr, ZeroPage, Official, 5),
            instruction!(0x56, "LSR", Lsr, ZeroPageX, Official, 6),
            instruction!(0x4E, "LSR", Lsr, Absolute, Official, 6),
            instruction!(0x5E, "LSR", Lsr, AbsoluteX, Official, 7),
            instruction!(0x2A, "ROL", Rol, Accumulator, Official, 2),
            instruction!(0x26, "ROL", Rol, ZeroPage, Official, 5),
            instruction!(0x36, "ROL", Rol, ZeroPageX, Official, 6),
            instruction!(0x2E, "ROL", Rol, Absolute, Official, 6),
            instruction!(0x3E, "ROL", Rol, AbsoluteX, Official, 7),
            instruction!(0x6A, "ROR", Ror, Accumulator, Official, 2),
            instruction!(0x66, "ROR", Ror, ZeroPage, Official, 5),
            instruction!(0x76, "ROR", Ror, ZeroPageX, Official, 6),
            instruction!(0x6E, "ROR", Ror, Absolute, Official, 6),
            instruction!(0x7E, "ROR", Ror, AbsoluteX, Official, 7),

            // Flag instructions
            instruction!(0x18, "CLC", Clc, Implied, Official, 2),
            instruction!(0xD8, "CLD", Cld, Implied, Official, 2),
            instruction!(0x58, "CLI", Cli, Implied, Official, 2),
            instruction!(0xB8, "CLV", Clv, Implied, Official, 2),
            instruction!(0x38, "SEC", Sec, Implied, Official, 2),
            instruction!(0xF8, "SED", Sed, Implied, Official, 2),
            instruction!(0x78, "SEI", Sei, Implied, Official, 2),

            // Comparisons
            instruction!(0xC9, "CMP", Cmp, Immediate, Official, 2),
            instruction!(0xC5, "CMP", Cmp, ZeroPage, Official, 3),
            instruction!(0xD5, "CMP", Cmp, ZeroPageX, Official, 4),
            instruction!(0xCD, "CMP", Cmp, Absolute, Official, 4),
            instruction!(0xDD, "CMP", Cmp, AbsoluteX, Official, 4),
            instruction!(0xD9, "CMP", Cmp, AbsoluteY, Official, 4),
            instruction!(0xC1, "CMP", Cmp, IndirectX, Official, 6),
            instruction!(0xD1, "CMP", Cmp, IndirectY, Official, 5),
            instruction!(0xE0, "CPX", Cpx, Immediate, Official, 2),
            instruction!(0xE4, "CPX", Cpx, ZeroPage, Official, 3),
            instruction!(0xEC, "CPX", Cpx, Absolute, Official, 4),
            instruction!(0xC0, "CPY", Cpy, Immediate, Official, 2),
            instruction!(0xC4, "CPY", Cpy, ZeroPage, Official, 3),
            instruction!(0xCC, "CPY", Cpy, Absolute, Official, 4),

            // Conditional branch instructions
            instruction!(0x90, "BCC", Bcc, Relative, Official, 2),
            instruction!(0xB0, "BCS", Bcs, Relative, Official, 2),
            instruction!(0xF0, "BEQ", Beq, Relative, Official, 2),
            instruction!(0x30, "BMI", Bmi, Relative, Official, 2),
            instruction!(0xD0, "BNE", Bne, Relative, Official, 2),
            instruction!(0x10, "BPL", Bpl, Relative, Official, 2),
            instruction!(0x50, "BVC", Bvc, Relative, Official, 2),
            instruction!(0x70, "BVS", Bvs, Relative, Official, 2),

            // Jumps and subroutines
            instruction!(0x4C, "JMP", Jmp, Absolute, Official, 3),
            instruction!(0x6C, "JMP", Jmp, Indirect, Official, 5),
            instruction!(0x20, "JSR", Jsr, Absolute, Official, 6),
            instruction!(0x60, "RTS", Rts, Implied, Official, 6),

            // Interrupts
            instruction!(0x00, "BRK", Brk, Implied, Official, 7),
            instruction!(0x40, "RTI", Rti, Implied, Official, 6),

            // Other
            instruction!(0x24, "BIT", Bit, ZeroPage, Official, 3),
            instruction!(0x2C, "BIT", Bit, Absolute, Official, 4),
            instruction!(0xEA, "NOP", Nop, Implied, Official, 2),
            instruction!(0x1A, "NOP", Nop, Implied, Unofficial, 2),
            instruction!(0x3A, "NOP", Nop, Implied, Unofficial, 2),
            instruction!(0x5A, "NOP", Nop, Implied, Unofficial, 2),
            instruction!(0x7A, "NOP", Nop, Implied, Unofficial, 2),
            instruction!(0xDA, "NOP", Nop, Implied, Unofficial, 2),
            instruction!(0xFA, "NOP", Nop, Implied, Unofficial, 2),
            instruction!(0x80, "NOP", Nop, Immediate, Unofficial, 2),
            instruction!(0x82, "NOP", Nop, Immediate, Unofficial, 2),
            instruction!(0x89, "NOP", Nop, Immediate, Unofficial, 2),
            instruction!(0xC2, "NOP", Nop, Immediate, Unofficial, 2),
            instruction!(0xE2, "NOP", Nop, Immediate, Unofficial, 2),
            instruction!(0x04, "NOP", Nop, ZeroPage, Unofficial, 3),
            instruction!(0x44, "NOP", Nop, ZeroPage, Unofficial, 3),
            instruction!(0x64, "NOP", Nop, ZeroPage, Unofficial, 3),
            instruction!(0x14, "NOP", Nop, ZeroPageX, Unofficial, 4),
            instruction!(0x34, "NOP", Nop, ZeroPageX, Unofficial, 4),
            instruction!(0x54, "NOP", Nop, ZeroPageX, Unofficial, 4),
            instruction!(0x74, "NOP", Nop, ZeroPageX, Unofficial, 4),
            instruction!(0xD4, "NOP", Nop, ZeroPageX, Unofficial, 4),
            instruction!(0xF4, "NOP", Nop, ZeroPageX, Unofficial, 4),
            instruction!(0x0C, "NOP", Nop, Absolute, Unofficial, 4),
            instruction!(0x1C, "NOP", Nop, AbsoluteX, Unofficial, 4),
            instruction!(0x3C, "NOP", Nop, AbsoluteX, Unofficial, 4),
            instruction!(0x5C, "NOP", Nop, AbsoluteX, Unofficial, 4),
            instruction!(0x7C, "NOP", Nop, AbsoluteX, Unofficial, 4),
            instruction!(0xDC, "NOP", Nop, AbsoluteX, Unofficial, 4),
            instruction!(0xFC, "NOP", Nop, AbsoluteX, Unofficial, 4),

            // Unofficial instructions
            instruction!(0x07, "SLO", Slo, ZeroPage, Unofficial, 5),
            instruction!(0x17, "SLO", Slo, ZeroPageX, Unofficial, 6),
            instruction!(0x0F, "SLO", Slo, Absolute, Unofficial, 6),
            instruction!(0x1F, "SLO", Slo, AbsoluteX, Unofficial, 7),
            instruction!(0x1B, "SLO", Slo, AbsoluteY, Unofficial, 7),
            instruction!(0x03, "SLO", Slo, IndirectX, Unofficial, 8),
            instruction!(0x13, "SLO", Slo, IndirectY, Unofficial, 8),
            instruction!(0x27, "RLA", Rla, ZeroPage, Unofficial, 5),
            instruction!(0x37, "RLA", Rla, ZeroPageX, Unofficial, 6),
            instruction!(0x2F, "RLA", Rla, Absolute, Unofficial, 6),
            instruction!(0x3F, "RLA", Rla, AbsoluteX, Unofficial, 7),
            instruction!(0x3B, "RLA", Rla, AbsoluteY, Unofficial, 7),
            instruction!(0x23, "RLA", Rla, IndirectX, Unofficial, 8),
            instruction!(0x33, "RLA", Rla, IndirectY, Unofficial, 8),
            instruction!(0x47, "SRE", Sre, ZeroPage, Unofficial, 5),
            instruction!(0x57, "SRE", Sre, ZeroPageX, Unofficial, 6),
            instruction!(0x4F, "SRE", Sre, Absolute, Unofficial, 6),
            instruction!(0x5F, "SRE", Sre, AbsoluteX, Unofficial, 7),
            instruction!(0x5B, "SRE", Sre, AbsoluteY, Unofficial, 7),
            instruction!(0x43, "SRE", Sre, IndirectX, Unofficial, 8),
            instruction!(0x53, "SRE", Sre, IndirectY, Unofficial, 8),
            instruction!(0x67, "RRA", Rra, ZeroPage, Unofficial, 5),
            instruction!(0x77, "RRA", Rra, ZeroPageX, Unofficial, 6),
            instruction!(0x6F, "RRA", Rra, Absolute, Unofficial, 6),
            instruction!(0x7F, "RRA", Rra, AbsoluteX, Unofficial, 7),
            instruction!(0x7B, "RRA", Rra, AbsoluteY, Unofficial, 7),
            instruction!(0x63, "RRA", Rra, IndirectX, Unofficial, 8),
            instruction!(0x73, "RRA", Rra, IndirectY, Unofficial, 8),
            instruction!(0x87, "SAX", Sax, ZeroPage, Unofficial, 3),
            instruction!(0x97, "SAX", Sax, ZeroPageY, Unofficial, 4),
            instruction!(0x8F, "SAX", Sax, Absolute, Unofficial, 4),
            instruction!(0x83, "SAX", Sax, IndirectX, Unofficial, 6),
            instruction!(0xA7, "LAX", Lax, ZeroPage, Unofficial, 3),
            instruction!(0xB7, "LAX", Lax, ZeroPageY, Unofficial, 4),
            instruction!(0xAF, "LAX", Lax, Absolute, Unofficial, 4),
            instruction!(0xBF, "LAX", Lax, AbsoluteY, Unofficial, 4),
            instruction!(0xA3, "LAX", Lax, IndirectX, Unofficial, 6),
            instruction!(0xB3, "LAX", Lax, IndirectY, Unofficial, 5),
            instruction!(0xC7, "DCP", Dcp, ZeroPage, Unofficial, 5),
            instruction!(0xD7, "DCP", Dcp, ZeroPageX, Unofficial, 6),
            instruction!(0xCF, "DCP", Dcp, Absolute, Unofficial, 6),
            instruction!(0xDF, "DCP", Dcp, AbsoluteX, Unofficial, 7),
            instruction!(0xDB, "DCP", Dcp, AbsoluteY, Unofficial, 7),
            instruction!(0xC3, "DCP", Dcp, IndirectX, Unofficial, 8),
            instruction!(0xD3, "DCP", Dcp, IndirectY, Unofficial, 8),
            instruction!(0xE7, "ISC", Isc, ZeroPage, Unofficial, 5),
            instruction!(0xF7, "ISC", Isc, ZeroPageX, Unofficial, 6),
            instruction!(0xEF, "ISC", Isc, Absolute, Unofficial, 6),
            instruction!(0xFF, "ISC", Isc, AbsoluteX, Unofficial, 7),
            instruction!(0xFB, "ISC", Isc, AbsoluteY, Unofficial, 7),
            instruction!(0xE3, "ISC", Isc, IndirectX, Unofficial, 8),
            instruction!(0xF3, "ISC", Isc, IndirectY, Unofficial, 8),
            instruction!(0x0B, "ANC", Anc, Immediate, Unofficial, 2),
            instruction!(0x2B, "ANC", Anc, Immediate, Unofficial, 2),
            instruction!(0x4B, "ALR", Alr, Immediate, Unofficial, 2),
            instruction!(0x6B, "ARR", Arr, Immediate, Unofficial, 2),
            instruction!(0x8B, "XAA", Xaa, Immediate, Unofficial, 2),
            instruction!(0xAB, "LXA", Lxa, Immediate, Unofficial, 2),
            instruction!(0xCB, "SBX", Sbx, Immediate, Unofficial, 2),
            instruction!(0xBB, "LAS", Las, AbsoluteY, Unofficial, 4),

            // Halt instructions, the processor jams
            instruction!(0x02, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x12, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x22, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x32, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x42, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x52, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x62, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x72, "JAM", Jam, Implied, Halt, 2),
            instruction!(0x92, "JAM", Jam, Implied, Halt, 2),
            instruction!(0xB2, "JAM", Jam, Implied, Halt, 2),
            instruction!(0xD2, "JAM", Jam, Implied, Halt, 2),
            instruction!(0xF2, "JAM", Jam, Implied, Halt, 2),

            // Unstable instructions
            instruction!(0x9C, "SHY", Unstable, AbsoluteX, Unstable, 5),
            instruction!(0x9B, "TAS", Unstable, AbsoluteY, Unstable, 5),
            instruction!(0x9E, "SHX", Unstable, AbsoluteY, Unstable, 5),
            instruction!(0x9F, "SHA", Unstable, AbsoluteY, Unstable, 5),
            instruction!(0x93, "SHA", Unstable, IndirectY, Unstable, 6),
        ];

        let mut instructions = [instruction!(0x02, "JAM", Jam, Implied, Halt, 2); 256];
        for instruction in table {
            instructions[instruction.opcode as usize] = instruction;
        }

        Self { instructions }
    }

    pub fn lookup(&self, opcode: Opcode) -> &Instruction {
        &self.instructions[opcode as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self::new()
    }
}
