#[cfg(test)]
mod tests;

use log::{trace, warn};

use crate::errors::VcsError;
use crate::hardware::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, STACK_PAGE};
use crate::interfaces::Memory;
use crate::processor::instruction::{AddressingMode, Instruction, Operation};
use crate::processor::instruction_set::INSTRUCTION_SET;
use crate::processor::internal_cpu::InternalCpu;
use crate::processor::operations;
use crate::processor::status_register::StatusRegister;
use crate::processor::status_register::StatusRegisterFlag::*;
use crate::types::SharedMemory;
use crate::utils;

/// Cycles spent pushing state and fetching the vector of an interrupt
const INTERRUPT_CYCLES: u32 = 7;

/// MOS 6502 (6507 in the VCS) processor emulator.
///
/// CPU abstraction is connected to a `Memory` to perform read and
/// write operations on it. The whole opcode space is implemented,
/// unofficial opcodes included, and every call to `run_instruction`
/// executes exactly one instruction.
pub struct Cpu {
    cpu: InternalCpu,
    memory: SharedMemory,

    // cycles spent by the instruction in flight
    cycles: u32,

    irq_requested: bool,
    nmi_requested: bool,

    // CLI, SEI and PLP change the interrupt disable flag one instruction
    // late: the interrupt poll right after them still sees the old value
    deferred_interrupt_disable: Option<bool>,
}

pub enum Interrupt {
    MaskableInterrupt,
    NonMaskableInterrupt,
}

/// Snapshot of the programmer-visible registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    pub acc: u8,
    pub x_reg: u8,
    pub y_reg: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

pub struct CpuBuilder {
    memory: Option<SharedMemory>,
    decimal_mode: bool,
}

impl CpuBuilder {
    pub fn memory(mut self, memory: SharedMemory) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Disabling decimal mode makes ADC and SBC ignore the D flag
    pub fn decimal_mode(mut self, enabled: bool) -> Self {
        self.decimal_mode = enabled;
        self
    }

    pub fn build(self) -> Result<Cpu, VcsError> {
        let memory = self.memory.ok_or(VcsError::MissingMemory)?;

        let mut cpu = Cpu {
            cpu: InternalCpu {
                decimal_mode: self.decimal_mode,
                ..Default::default()
            },
            memory,
            cycles: 0,
            irq_requested: false,
            nmi_requested: false,
            deferred_interrupt_disable: None,
        };
        cpu.reset();

        Ok(cpu)
    }
}

impl Cpu {
    pub fn builder() -> CpuBuilder {
        CpuBuilder {
            memory: None,
            decimal_mode: true,
        }
    }

    /// Power-on/reset sequence. Registers are cleared and execution
    /// continues from the reset vector
    pub fn reset(&mut self) {
        self.cpu.acc = 0;
        self.cpu.x_reg = 0;
        self.cpu.y_reg = 0;
        self.cpu.sp = 0xFD;
        self.cpu.sr = StatusRegister::power_on();
        self.cpu.pc = self.read_word(RESET_VECTOR);

        self.cycles = 0;
        self.irq_requested = false;
        self.nmi_requested = false;
        self.deferred_interrupt_disable = None;
    }

    /// Request an interrupt. It will be serviced after the current
    /// instruction if the processor accepts it
    pub fn interrupt(&mut self, interrupt: Interrupt) {
        match interrupt {
            Interrupt::MaskableInterrupt => self.irq_requested = true,
            Interrupt::NonMaskableInterrupt => self.nmi_requested = true,
        }
    }

    pub fn registers(&self) -> Registers {
        Registers {
            acc: self.cpu.acc,
            x_reg: self.cpu.x_reg,
            y_reg: self.cpu.y_reg,
            sp: self.cpu.sp,
            pc: self.cpu.pc,
            status: self.cpu.sr.into(),
        }
    }

    /// Execute a single instruction and any interrupt pending after it.
    /// Return the number of cycles spent
    pub fn run_instruction(&mut self) -> u32 {
        let address = self.cpu.pc;
        let opcode = self.fetch_byte();
        let instruction = *INSTRUCTION_SET.lookup(opcode);
        trace!(
            "${address:0>4X}: {opcode:0>2X} {} {:?}",
            instruction.name,
            instruction.addressing_mode
        );

        self.cycles = instruction.cycles as u32;
        self.execute(&instruction, address);
        self.poll_interrupts();

        self.cycles
    }

    fn execute(&mut self, instruction: &Instruction, address: u16) {
        use Operation::*;

        let mode = instruction.addressing_mode;

        match instruction.operation {
            // Transfer instructions
            Lda => self.read_with(mode, operations::lda),
            Ldx => self.read_with(mode, operations::ldx),
            Ldy => self.read_with(mode, operations::ldy),
            Sta => self.store(mode, operations::sta(&self.cpu)),
            Stx => self.store(mode, operations::stx(&self.cpu)),
            Sty => self.store(mode, operations::sty(&self.cpu)),
            Tax => operations::tax(&mut self.cpu),
            Tay => operations::tay(&mut self.cpu),
            Tsx => operations::tsx(&mut self.cpu),
            Txa => operations::txa(&mut self.cpu),
            Txs => operations::txs(&mut self.cpu),
            Tya => operations::tya(&mut self.cpu),

            // Stack instructions
            Pha => self.push(self.cpu.acc),
            Php => self.push(self.cpu.sr.to_stack(true)),
            Pla => {
                let value = self.pull();
                operations::lda(&mut self.cpu, value);
            }
            Plp => {
                let pulled = StatusRegister::from_stack(self.pull());
                self.set_status_deferred(pulled);
            }

            // Decrements and increments
            Dec => {
                self.read_modify_write(mode, operations::dec);
            }
            Inc => {
                self.read_modify_write(mode, operations::inc);
            }
            Dex => operations::dex(&mut self.cpu),
            Dey => operations::dey(&mut self.cpu),
            Inx => operations::inx(&mut self.cpu),
            Iny => operations::iny(&mut self.cpu),

            // Arithmetic and logical operations
            Adc => self.read_with(mode, operations::adc),
            Sbc => self.read_with(mode, operations::sbc),
            And => self.read_with(mode, operations::and),
            Eor => self.read_with(mode, operations::eor),
            Ora => self.read_with(mode, operations::ora),

            // Shift and rotate instructions
            Asl => {
                self.read_modify_write(mode, operations::asl);
            }
            Lsr => {
                self.read_modify_write(mode, operations::lsr);
            }
            Rol => {
                self.read_modify_write(mode, operations::rol);
            }
            Ror => {
                self.read_modify_write(mode, operations::ror);
            }

            // Flag instructions
            Clc => self.cpu.sr.clear(Carry),
            Cld => self.cpu.sr.clear(Decimal),
            Clv => self.cpu.sr.clear(Overflow),
            Sec => self.cpu.sr.set(Carry),
            Sed => self.cpu.sr.set(Decimal),
            Cli => self.deferred_interrupt_disable = Some(false),
            Sei => self.deferred_interrupt_disable = Some(true),

            // Comparisons
            Cmp => self.read_with(mode, operations::cmp),
            Cpx => self.read_with(mode, operations::cpx),
            Cpy => self.read_with(mode, operations::cpy),
            Bit => self.read_with(mode, operations::bit),

            // Conditional branch instructions
            Bcc => self.branch(!self.cpu.sr.get(Carry)),
            Bcs => self.branch(self.cpu.sr.get(Carry)),
            Beq => self.branch(self.cpu.sr.get(Zero)),
            Bmi => self.branch(self.cpu.sr.get(Negative)),
            Bne => self.branch(!self.cpu.sr.get(Zero)),
            Bpl => self.branch(!self.cpu.sr.get(Negative)),
            Bvc => self.branch(!self.cpu.sr.get(Overflow)),
            Bvs => self.branch(self.cpu.sr.get(Overflow)),

            // Jumps and subroutines
            Jmp => self.cpu.pc = self.operand_address(mode),
            Jsr => {
                let target = self.fetch_word();
                // return address points to the last byte of JSR
                self.push_word(self.cpu.pc.wrapping_sub(1));
                self.cpu.pc = target;
            }
            Rts => self.cpu.pc = self.pull_word().wrapping_add(1),

            // Interrupts
            Brk => {
                // BRK has a padding byte after the opcode
                self.cpu.pc = self.cpu.pc.wrapping_add(1);
                self.push_word(self.cpu.pc);
                self.push(self.cpu.sr.to_stack(true));
                self.cpu.sr.set(InterruptDisable);
                self.cpu.pc = self.read_word(IRQ_VECTOR);
            }
            Rti => {
                self.cpu.sr = StatusRegister::from_stack(self.pull());
                self.cpu.pc = self.pull_word();
            }

            Nop => match mode {
                // indexed NOPs perform the read and pay for page crossings
                AddressingMode::AbsoluteX => {
                    self.read_operand(mode);
                }
                _ => self.skip_operand(mode),
            },

            // Unofficial instructions
            Slo => {
                let value = self.read_modify_write(mode, operations::asl);
                operations::ora(&mut self.cpu, value);
            }
            Rla => {
                let value = self.read_modify_write(mode, operations::rol);
                operations::and(&mut self.cpu, value);
            }
            Sre => {
                let value = self.read_modify_write(mode, operations::lsr);
                operations::eor(&mut self.cpu, value);
            }
            Rra => {
                let value = self.read_modify_write(mode, operations::ror);
                operations::adc(&mut self.cpu, value);
            }
            Dcp => {
                let value = self.read_modify_write(mode, operations::dec);
                operations::cmp(&mut self.cpu, value);
            }
            Isc => {
                let value = self.read_modify_write(mode, operations::inc);
                operations::sbc(&mut self.cpu, value);
            }
            Sax => self.store(mode, operations::sax(&self.cpu)),
            Lax => self.read_with(mode, operations::lax),
            Anc => self.read_with(mode, operations::anc),
            Alr => self.read_with(mode, operations::alr),
            Arr => self.read_with(mode, operations::arr),
            Xaa => self.read_with(mode, operations::xaa),
            Lxa => self.read_with(mode, operations::lxa),
            Sbx => self.read_with(mode, operations::sbx),
            Las => self.read_with(mode, operations::las),

            Jam => {
                warn!(
                    "Processor jammed by {} (${:0>2X}) at ${address:0>4X}",
                    instruction.name, instruction.opcode
                );
            }
            Unstable => {
                warn!(
                    "Unstable opcode {} (${:0>2X}) at ${address:0>4X} ignored",
                    instruction.name, instruction.opcode
                );
                self.skip_operand(mode);
            }
        }
    }

    fn poll_interrupts(&mut self) {
        // the decision uses the interrupt disable flag as it was before the
        // instruction's deferred change
        let interrupts_enabled = !self.cpu.sr.get(InterruptDisable);
        let service = (self.irq_requested && interrupts_enabled) || self.nmi_requested;

        if let Some(disabled) = self.deferred_interrupt_disable.take() {
            self.cpu.sr.set_value(InterruptDisable, disabled);
        }

        if !service {
            return;
        }

        let vector = if self.nmi_requested {
            NMI_VECTOR
        } else {
            IRQ_VECTOR
        };
        trace!("Servicing interrupt through ${vector:0>4X}");

        self.cycles += INTERRUPT_CYCLES;
        self.push_word(self.cpu.pc);
        self.push(self.cpu.sr.to_stack(false));
        self.cpu.sr.set(InterruptDisable);
        self.cpu.pc = self.read_word(vector);

        self.irq_requested = false;
        self.nmi_requested = false;
    }

    fn set_status_deferred(&mut self, mut status: StatusRegister) {
        let interrupt_disable = status.get(InterruptDisable);
        status.set_value(InterruptDisable, self.cpu.sr.get(InterruptDisable));
        self.cpu.sr = status;
        self.deferred_interrupt_disable = Some(interrupt_disable);
    }

    // Operand access
    // --------------

    fn read_with(&mut self, mode: AddressingMode, operation: fn(&mut InternalCpu, u8)) {
        let operand = self.read_operand(mode);
        operation(&mut self.cpu, operand);
    }

    /// Fetch the operand of a read instruction. Indexing across a page
    /// costs an extra cycle
    fn read_operand(&mut self, mode: AddressingMode) -> u8 {
        let (address, page_crossed) = self.effective_address(mode);
        if page_crossed {
            self.cycles += 1;
        }
        self.memory_read(address)
    }

    /// Address of a store or read-modify-write. Those always take their
    /// worst case time, already accounted in the base cycles
    fn operand_address(&mut self, mode: AddressingMode) -> u16 {
        let (address, _) = self.effective_address(mode);
        address
    }

    fn store(&mut self, mode: AddressingMode, data: u8) {
        let address = self.operand_address(mode);
        self.memory_write(address, data);
    }

    fn read_modify_write(
        &mut self,
        mode: AddressingMode,
        operation: fn(&mut InternalCpu, u8) -> u8,
    ) -> u8 {
        if mode == AddressingMode::Accumulator {
            let acc = self.cpu.acc;
            self.cpu.acc = operation(&mut self.cpu, acc);
            return self.cpu.acc;
        }

        let address = self.operand_address(mode);
        let operand = self.memory_read(address);
        let result = operation(&mut self.cpu, operand);
        self.memory_write(address, result);
        result
    }

    /// Move the program counter past the operand without touching memory
    fn skip_operand(&mut self, mode: AddressingMode) {
        self.cpu.pc = self.cpu.pc.wrapping_add(mode.operand_bytes() as u16);
    }

    fn branch(&mut self, condition: bool) {
        let offset = self.fetch_byte() as i8;
        if !condition {
            return;
        }

        let target = self.cpu.pc.wrapping_add(offset as u16);
        self.cycles += 1;
        if utils::page_crossed(self.cpu.pc, target) {
            self.cycles += 1;
        }
        self.cpu.pc = target;
    }

    /// Resolve the address an addressing mode points to, consuming the
    /// operand bytes. Also tell whether indexing crossed a page boundary
    fn effective_address(&mut self, mode: AddressingMode) -> (u16, bool) {
        use AddressingMode::*;

        match mode {
            Immediate => {
                let address = self.cpu.pc;
                self.cpu.pc = self.cpu.pc.wrapping_add(1);
                (address, false)
            }
            ZeroPage => (self.fetch_byte() as u16, false),
            ZeroPageX => {
                let base = self.fetch_byte();
                (base.wrapping_add(self.cpu.x_reg) as u16, false)
            }
            ZeroPageY => {
                let base = self.fetch_byte();
                (base.wrapping_add(self.cpu.y_reg) as u16, false)
            }
            Absolute => (self.fetch_word(), false),
            AbsoluteX => {
                let base = self.fetch_word();
                let address = base.wrapping_add(self.cpu.x_reg as u16);
                (address, utils::page_crossed(base, address))
            }
            AbsoluteY => {
                let base = self.fetch_word();
                let address = base.wrapping_add(self.cpu.y_reg as u16);
                (address, utils::page_crossed(base, address))
            }
            IndirectX => {
                let pointer = self.fetch_byte().wrapping_add(self.cpu.x_reg);
                (self.read_zero_page_word(pointer), false)
            }
            IndirectY => {
                let pointer = self.fetch_byte();
                let base = self.read_zero_page_word(pointer);
                let address = base.wrapping_add(self.cpu.y_reg as u16);
                (address, utils::page_crossed(base, address))
            }
            Indirect => {
                // the high byte is fetched without carrying into the
                // pointer's page: JMP ($12FF) reads $12FF and $1200
                let pointer = self.fetch_word();
                let low = self.memory_read(pointer);
                let high = self.memory_read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                (u16::from_le_bytes([low, high]), false)
            }
            Implied | Accumulator | Relative => {
                unreachable!("{mode:?} addressing has no operand address")
            }
        }
    }

    // Memory access
    // -------------

    fn memory_read(&self, address: u16) -> u8 {
        self.memory.borrow().read(address)
    }

    fn memory_write(&self, address: u16, data: u8) {
        self.memory.borrow_mut().write(address, data);
    }

    fn read_word(&self, address: u16) -> u16 {
        let low = self.memory_read(address);
        let high = self.memory_read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    fn read_zero_page_word(&self, pointer: u8) -> u16 {
        let low = self.memory_read(pointer as u16);
        let high = self.memory_read(pointer.wrapping_add(1) as u16);
        u16::from_le_bytes([low, high])
    }

    fn fetch_byte(&mut self) -> u8 {
        let data = self.memory_read(self.cpu.pc);
        self.cpu.pc = self.cpu.pc.wrapping_add(1);
        data
    }

    fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte();
        let high = self.fetch_byte();
        u16::from_le_bytes([low, high])
    }

    // Stack
    // -----
    //
    // The stack lives in page 1 and the stack pointer wraps around it

    fn push(&mut self, data: u8) {
        self.memory_write(STACK_PAGE | self.cpu.sp as u16, data);
        self.cpu.sp = self.cpu.sp.wrapping_sub(1);
    }

    fn pull(&mut self) -> u8 {
        self.cpu.sp = self.cpu.sp.wrapping_add(1);
        self.memory_read(STACK_PAGE | self.cpu.sp as u16)
    }

    fn push_word(&mut self, data: u16) {
        let [low, high] = data.to_le_bytes();
        self.push(high);
        self.push(low);
    }

    fn pull_word(&mut self) -> u16 {
        let low = self.pull();
        let high = self.pull();
        u16::from_le_bytes([low, high])
    }
}
