#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use mockall::mock;
use mockall::predicate::eq;

use super::*;
use crate::interfaces::Memory;
use crate::processor::instruction::OpcodeClass;
use crate::processor::memory::Ram;

mock! {
    TestMemory {}

    impl Memory for TestMemory {
        fn read(&self, address: u16) -> u8;
        fn write(&mut self, address: u16, data: u8);
    }
}

const PROGRAM_START: u16 = 0x0200;
const IRQ_HANDLER: u16 = 0x3000;
const NMI_HANDLER: u16 = 0x4000;

impl MockTestMemory {
    fn load_program(&mut self, start: u16, program: &[u8]) {
        for (offset, value) in program.iter().enumerate() {
            let (address, value) = (start + offset as u16, *value);
            self.expect_read().with(eq(address)).return_const(value);
        }
    }

    fn reset_vector(&mut self, address: u16) {
        let [low, high] = address.to_le_bytes();
        self.expect_read().with(eq(RESET_VECTOR)).return_const(low);
        self.expect_read().with(eq(RESET_VECTOR + 1)).return_const(high);
    }
}

// Get a CPU with mocked memory and a loaded program
fn test_cpu_with_mock(program: &[u8], setup: impl FnOnce(&mut MockTestMemory)) -> Cpu {
    let mut memory = MockTestMemory::new();
    memory.reset_vector(PROGRAM_START);
    memory.load_program(PROGRAM_START, program);
    setup(&mut memory);

    let memory: SharedMemory = Rc::new(RefCell::new(memory));
    Cpu::builder().memory(memory).build().unwrap()
}

// Get a CPU on a 64 kB RAM with `program` loaded at `start`
fn test_cpu_at(start: u16, program: &[u8]) -> (Cpu, Rc<RefCell<Ram>>) {
    let mut ram = Ram::full();
    ram.load(RESET_VECTOR, &start.to_le_bytes());
    ram.load(IRQ_VECTOR, &IRQ_HANDLER.to_le_bytes());
    ram.load(NMI_VECTOR, &NMI_HANDLER.to_le_bytes());
    ram.load(start, program);

    let ram = Rc::new(RefCell::new(ram));
    let memory: SharedMemory = ram.clone();
    let cpu = Cpu::builder().memory(memory).build().unwrap();

    (cpu, ram)
}

fn test_cpu_with_program(program: &[u8]) -> (Cpu, Rc<RefCell<Ram>>) {
    test_cpu_at(PROGRAM_START, program)
}

fn peek(ram: &Rc<RefCell<Ram>>, address: u16) -> u8 {
    ram.borrow().read(address)
}

//////////////////////////////////////////////////////////////////////
// CONSTRUCTION AND RESET
//////////////////////////////////////////////////////////////////////

#[test]
fn test_build_without_memory_fails() {
    let result = Cpu::builder().decimal_mode(false).build();
    assert!(matches!(result, Err(VcsError::MissingMemory)));
}

#[test]
fn test_reset_state() {
    let cpu = test_cpu_with_mock(&[], |_| {});

    assert_eq!(
        cpu.registers(),
        Registers {
            acc: 0,
            x_reg: 0,
            y_reg: 0,
            sp: 0xFD,
            pc: PROGRAM_START,
            status: 0b0010_0100,
        }
    );
}

#[test]
fn test_reset_reloads_vector_and_registers() {
    let (mut cpu, ram) = test_cpu_with_program(&[0xA9, 0x42, 0xAA]); // LDA #$42; TAX
    cpu.run_instruction();
    cpu.run_instruction();
    assert_eq!(cpu.registers().x_reg, 0x42);

    ram.borrow_mut().load(RESET_VECTOR, &[0x00, 0x10]);
    cpu.reset();

    let registers = cpu.registers();
    assert_eq!(registers.acc, 0);
    assert_eq!(registers.x_reg, 0);
    assert_eq!(registers.pc, 0x1000);
}

//////////////////////////////////////////////////////////////////////
// INSTRUCTION LENGTHS AND TIMING
//////////////////////////////////////////////////////////////////////

#[test]
fn test_every_opcode_length_and_base_cycles() {
    use Operation::*;

    for instruction in INSTRUCTION_SET.iter() {
        let control_flow = matches!(
            instruction.operation,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Jmp | Jsr | Rts | Brk | Rti
        );
        if control_flow {
            continue;
        }

        // zeroed operands and index registers never cross a page
        let (mut cpu, _) = test_cpu_with_program(&[instruction.opcode, 0x00, 0x00]);
        let cycles = cpu.run_instruction();

        assert_eq!(
            cpu.registers().pc,
            PROGRAM_START + instruction.bytes() as u16,
            "{} (${:0>2X}) length",
            instruction.name,
            instruction.opcode
        );
        assert_eq!(
            cycles, instruction.cycles as u32,
            "{} (${:0>2X}) cycles",
            instruction.name, instruction.opcode
        );
    }
}

#[test]
fn test_page_crossing_costs_one_cycle_on_reads_only() {
    // LDX #$01; LDA $02FF,X
    let (mut cpu, _) = test_cpu_with_program(&[0xA2, 0x01, 0xBD, 0xFF, 0x02]);
    cpu.run_instruction();
    assert_eq!(cpu.run_instruction(), 5);

    // LDX #$01; STA $02FF,X
    let (mut cpu, ram) = test_cpu_with_program(&[0xA2, 0x01, 0xA9, 0x07, 0x9D, 0xFF, 0x02]);
    cpu.run_instruction();
    cpu.run_instruction();
    assert_eq!(cpu.run_instruction(), 5);
    assert_eq!(peek(&ram, 0x0300), 0x07);

    // LDY #$10; LDA ($80),Y with ($80) = $12F8
    let (mut cpu, ram) = test_cpu_with_program(&[0xA0, 0x10, 0xB1, 0x80]);
    ram.borrow_mut().load(0x0080, &[0xF8, 0x12]);
    ram.borrow_mut().load(0x1308, &[0x99]);
    cpu.run_instruction();
    assert_eq!(cpu.run_instruction(), 6);
    assert_eq!(cpu.registers().acc, 0x99);

    // LDX #$01; NOP $02FF,X
    let (mut cpu, _) = test_cpu_with_program(&[0xA2, 0x01, 0x1C, 0xFF, 0x02]);
    cpu.run_instruction();
    assert_eq!(cpu.run_instruction(), 5);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 5);
}

#[test]
fn test_branch_timing() {
    // BEQ not taken (Z clear after reset)
    let (mut cpu, _) = test_cpu_with_program(&[0xF0, 0x10]);
    assert_eq!(cpu.run_instruction(), 2);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 2);

    // BNE taken, same page
    let (mut cpu, _) = test_cpu_with_program(&[0xD0, 0x10]);
    assert_eq!(cpu.run_instruction(), 3);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 0x12);

    // BNE taken backwards into the previous page
    let (mut cpu, _) = test_cpu_with_program(&[0xD0, 0xFC]);
    assert_eq!(cpu.run_instruction(), 4);
    assert_eq!(cpu.registers().pc, 0x01FE);

    // BNE taken forwards into the next page
    let (mut cpu, _) = test_cpu_at(0x02F0, &[0xD0, 0x7F]);
    assert_eq!(cpu.run_instruction(), 4);
    assert_eq!(cpu.registers().pc, 0x0371);
}

//////////////////////////////////////////////////////////////////////
// ARITHMETIC THROUGH THE INSTRUCTION STREAM
//////////////////////////////////////////////////////////////////////

#[test]
fn test_binary_overflow() {
    // CLC; LDA #$7F; ADC #$01
    let (mut cpu, _) = test_cpu_with_program(&[0x18, 0xA9, 0x7F, 0x69, 0x01]);
    for _ in 0..3 {
        cpu.run_instruction();
    }

    let registers = cpu.registers();
    assert_eq!(registers.acc, 0x80);
    let status = StatusRegister::from(registers.status);
    assert!(status.get(Overflow));
    assert!(status.get(Negative));
    assert!(!status.get(Carry));
}

#[test]
fn test_decimal_mode_switch() {
    // SED; CLC; LDA #$09; ADC #$01
    let program = [0xF8, 0x18, 0xA9, 0x09, 0x69, 0x01];

    let (mut cpu, _) = test_cpu_with_program(&program);
    for _ in 0..4 {
        cpu.run_instruction();
    }
    assert_eq!(cpu.registers().acc, 0x10);

    let mut ram = Ram::full();
    ram.load(RESET_VECTOR, &PROGRAM_START.to_le_bytes());
    ram.load(PROGRAM_START, &program);
    let memory: SharedMemory = Rc::new(RefCell::new(ram));
    let mut cpu = Cpu::builder()
        .memory(memory)
        .decimal_mode(false)
        .build()
        .unwrap();
    for _ in 0..4 {
        cpu.run_instruction();
    }
    assert_eq!(cpu.registers().acc, 0x0A);
}

#[test]
fn test_zero_page_indexing_wraps() {
    // LDX #$02; LDA $FF,X
    let (mut cpu, ram) = test_cpu_with_program(&[0xA2, 0x02, 0xB5, 0xFF]);
    ram.borrow_mut().load(0x0001, &[0x5A]);
    ram.borrow_mut().load(0x0101, &[0xA5]);
    cpu.run_instruction();
    cpu.run_instruction();
    assert_eq!(cpu.registers().acc, 0x5A);
}

//////////////////////////////////////////////////////////////////////
// STACK, JUMPS AND INTERRUPTS
//////////////////////////////////////////////////////////////////////

#[test]
fn test_stack_wraparound() {
    // LDX #$00; TXS; then 256 x PHA
    let mut program = vec![0xA2, 0x00, 0x9A];
    program.extend([0x48; 256]);
    let (mut cpu, ram) = test_cpu_with_program(&program);
    cpu.run_instruction();
    cpu.run_instruction();

    for i in 0..=255u8 {
        cpu.cpu.acc = i;
        let sp = cpu.registers().sp;
        cpu.run_instruction();

        assert_eq!(peek(&ram, STACK_PAGE | sp as u16), i);
        assert_eq!(cpu.registers().sp, sp.wrapping_sub(1));
        if i == 0 {
            assert_eq!(cpu.registers().sp, 0xFF);
        }
    }
    assert_eq!(cpu.registers().sp, 0x00);
}

#[test]
fn test_push_writes_through_memory() {
    // LDA #$42; PHA
    let mut cpu = test_cpu_with_mock(&[0xA9, 0x42, 0x48], |memory| {
        memory
            .expect_write()
            .with(eq(0x01FD), eq(0x42))
            .times(1)
            .return_const(());
    });
    cpu.run_instruction();
    cpu.run_instruction();
    assert_eq!(cpu.registers().sp, 0xFC);
}

#[test]
fn test_stack_instructions_PHP_PLP() {
    // SEC; PHP; CLC; PLP
    let (mut cpu, ram) = test_cpu_with_program(&[0x38, 0x08, 0x18, 0x28]);
    cpu.run_instruction();
    cpu.run_instruction();
    // break and unused bits are pushed set
    assert_eq!(peek(&ram, 0x01FD), 0b0011_0101);

    cpu.run_instruction();
    cpu.run_instruction();
    let status = StatusRegister::from(cpu.registers().status);
    assert!(status.get(Carry));
    assert!(!status.get(Break));
}

#[test]
fn test_subroutine_JSR_RTS() {
    // JSR $0210 ... $0210: RTS
    let (mut cpu, ram) = test_cpu_with_program(&[0x20, 0x10, 0x02]);
    ram.borrow_mut().load(0x0210, &[0x60]);

    assert_eq!(cpu.run_instruction(), 6);
    assert_eq!(cpu.registers().pc, 0x0210);
    assert_eq!(peek(&ram, 0x01FD), 0x02);
    assert_eq!(peek(&ram, 0x01FC), 0x02);

    assert_eq!(cpu.run_instruction(), 6);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 3);
    assert_eq!(cpu.registers().sp, 0xFD);
}

#[test]
fn test_jump_JMP_indirect_page_wrap() {
    // JMP ($02FF)
    let (mut cpu, ram) = test_cpu_with_program(&[0x6C, 0xFF, 0x02]);
    ram.borrow_mut().load(0x02FF, &[0x34]);
    ram.borrow_mut().load(0x0300, &[0x56]);
    // high byte comes from the start of the same page, the JMP opcode
    assert_eq!(cpu.run_instruction(), 5);
    assert_eq!(cpu.registers().pc, 0x6C34);
}

#[test]
fn test_interrupt_BRK_RTI() {
    let (mut cpu, ram) = test_cpu_with_program(&[0x00, 0xFF, 0xEA]);
    ram.borrow_mut().load(IRQ_HANDLER, &[0x40]); // RTI

    assert_eq!(cpu.run_instruction(), 7);
    assert_eq!(cpu.registers().pc, IRQ_HANDLER);
    assert_eq!(peek(&ram, 0x01FD), 0x02);
    assert_eq!(peek(&ram, 0x01FC), 0x02);
    assert_eq!(peek(&ram, 0x01FB), 0b0011_0100);

    assert_eq!(cpu.run_instruction(), 6);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 2);
    assert_eq!(cpu.registers().sp, 0xFD);
}

#[test]
fn test_masked_interrupt_is_ignored() {
    let (mut cpu, _) = test_cpu_with_program(&[0xEA, 0xEA]);
    cpu.interrupt(Interrupt::MaskableInterrupt);

    assert_eq!(cpu.run_instruction(), 2);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 1);
}

#[test]
fn test_interrupt_service_sequence() {
    // CLI; NOP
    let (mut cpu, ram) = test_cpu_with_program(&[0x58, 0xEA]);
    cpu.run_instruction();
    cpu.interrupt(Interrupt::MaskableInterrupt);

    assert_eq!(cpu.run_instruction(), 2 + 7);
    let registers = cpu.registers();
    assert_eq!(registers.pc, IRQ_HANDLER);
    assert_eq!(registers.sp, 0xFA);
    assert!(StatusRegister::from(registers.status).get(InterruptDisable));

    assert_eq!(peek(&ram, 0x01FD), 0x02);
    assert_eq!(peek(&ram, 0x01FC), 0x02);
    // break bit is clear on hardware interrupts
    assert_eq!(peek(&ram, 0x01FB), 0b0010_0000);
}

#[test]
fn test_non_maskable_interrupt_ignores_interrupt_disable() {
    let (mut cpu, _) = test_cpu_with_program(&[0xEA]);
    cpu.interrupt(Interrupt::NonMaskableInterrupt);

    assert_eq!(cpu.run_instruction(), 2 + 7);
    assert_eq!(cpu.registers().pc, NMI_HANDLER);
}

#[test]
fn test_deferred_interrupt_disable_SEI() {
    // CLI; SEI
    let (mut cpu, ram) = test_cpu_with_program(&[0x58, 0x78]);
    cpu.run_instruction();
    cpu.interrupt(Interrupt::MaskableInterrupt);

    // the interrupt still goes through right after SEI
    assert_eq!(cpu.run_instruction(), 2 + 7);
    assert_eq!(cpu.registers().pc, IRQ_HANDLER);
    assert_eq!(peek(&ram, 0x01FB), 0b0010_0100);
}

#[test]
fn test_deferred_interrupt_disable_CLI() {
    // CLI; NOP
    let (mut cpu, _) = test_cpu_with_program(&[0x58, 0xEA]);
    cpu.interrupt(Interrupt::MaskableInterrupt);

    // CLI takes effect one instruction late
    assert_eq!(cpu.run_instruction(), 2);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 1);

    assert_eq!(cpu.run_instruction(), 2 + 7);
    assert_eq!(cpu.registers().pc, IRQ_HANDLER);
}

#[test]
fn test_deferred_interrupt_disable_PLP() {
    // LDA #$00; PHA; PLP; NOP
    let (mut cpu, _) = test_cpu_with_program(&[0xA9, 0x00, 0x48, 0x28, 0xEA]);
    cpu.run_instruction();
    cpu.run_instruction();
    cpu.interrupt(Interrupt::MaskableInterrupt);

    assert_eq!(cpu.run_instruction(), 4);
    assert!(!StatusRegister::from(cpu.registers().status).get(InterruptDisable));

    assert_eq!(cpu.run_instruction(), 2 + 7);
    assert_eq!(cpu.registers().pc, IRQ_HANDLER);
}

//////////////////////////////////////////////////////////////////////
// UNOFFICIAL, HALT AND UNSTABLE OPCODES
//////////////////////////////////////////////////////////////////////

#[test]
fn test_read_modify_write_DCP_ISC() {
    // LDA #$10; DCP $80; ISC $81
    let (mut cpu, ram) = test_cpu_with_program(&[0xA9, 0x10, 0xC7, 0x80, 0xE7, 0x81]);
    ram.borrow_mut().load(0x0080, &[0x11, 0x04]);

    cpu.run_instruction();
    assert_eq!(cpu.run_instruction(), 5);
    assert_eq!(peek(&ram, 0x0080), 0x10);
    let status = StatusRegister::from(cpu.registers().status);
    assert!(status.get(Zero));
    assert!(status.get(Carry));

    assert_eq!(cpu.run_instruction(), 5);
    assert_eq!(peek(&ram, 0x0081), 0x05);
    assert_eq!(cpu.registers().acc, 0x0B);
}

#[test]
fn test_read_modify_write_SLO_SRE() {
    // LDA #$01; SLO $80; SRE $81
    let (mut cpu, ram) = test_cpu_with_program(&[0xA9, 0x01, 0x07, 0x80, 0x47, 0x81]);
    ram.borrow_mut().load(0x0080, &[0x40, 0x03]);

    cpu.run_instruction();
    cpu.run_instruction();
    assert_eq!(peek(&ram, 0x0080), 0x80);
    assert_eq!(cpu.registers().acc, 0x81);

    cpu.run_instruction();
    assert_eq!(peek(&ram, 0x0081), 0x01);
    assert_eq!(cpu.registers().acc, 0x80);
}

#[test]
fn test_read_modify_write_indirect_y_ignores_page_crossing() {
    // LDY #$10; SLO ($80),Y with ($80) = $12F8
    let (mut cpu, ram) = test_cpu_with_program(&[0xA0, 0x10, 0x13, 0x80]);
    ram.borrow_mut().load(0x0080, &[0xF8, 0x12]);
    cpu.run_instruction();
    assert_eq!(cpu.run_instruction(), 8);
}

#[test]
fn test_unofficial_LAX_SAX() {
    // LAX $80; LDX #$0F; SAX $81
    let (mut cpu, ram) = test_cpu_with_program(&[0xA7, 0x80, 0xA2, 0x0F, 0x87, 0x81]);
    ram.borrow_mut().load(0x0080, &[0x3C]);

    cpu.run_instruction();
    assert_eq!(cpu.registers().acc, 0x3C);
    assert_eq!(cpu.registers().x_reg, 0x3C);

    cpu.run_instruction();
    cpu.run_instruction();
    assert_eq!(peek(&ram, 0x0081), 0x0C);
}

#[test]
fn test_halt_opcode_consumes_only_the_opcode() {
    // no write expectations: any bus write makes the mock panic
    let mut cpu = test_cpu_with_mock(&[0x02, 0xEA], |_| {});

    assert_eq!(cpu.run_instruction(), 2);
    assert_eq!(cpu.registers().pc, PROGRAM_START + 1);
    assert_eq!(cpu.registers().acc, 0);
}

#[test]
fn test_unstable_opcodes_skip_operands_without_side_effects() {
    for instruction in INSTRUCTION_SET
        .iter()
        .filter(|i| i.class == OpcodeClass::Unstable)
    {
        let program = [instruction.opcode, 0x80, 0x00];
        let mut cpu = test_cpu_with_mock(&program[..instruction.bytes() as usize], |_| {});
        let before = cpu.registers();

        assert_eq!(cpu.run_instruction(), instruction.cycles as u32);
        let after = cpu.registers();
        assert_eq!(after.pc, PROGRAM_START + instruction.bytes() as u16);
        assert_eq!(
            Registers {
                pc: before.pc,
                ..after
            },
            before
        );
    }
}
