#![allow(non_snake_case)]

use crate::processor::instruction::{OpcodeClass, Operation};
use crate::processor::instruction_set::INSTRUCTION_SET;
use crate::processor::internal_cpu::*;
use crate::processor::operations;
use crate::processor::status_register::*;
use StatusRegisterFlag::*;

fn decimal_cpu() -> InternalCpu {
    let mut cpu = InternalCpu::default();
    cpu.sr.set(Decimal);
    cpu
}

fn bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

//////////////////////////////////////////////////////////////////////
// INSTRUCTION TABLE
//////////////////////////////////////////////////////////////////////

#[test]
fn test_instruction_table_covers_every_opcode() {
    for (index, instruction) in INSTRUCTION_SET.iter().enumerate() {
        assert_eq!(instruction.opcode as usize, index);
    }
    assert_eq!(INSTRUCTION_SET.iter().count(), 256);
}

#[test]
fn test_instruction_table_classes() {
    let count = |class: OpcodeClass| INSTRUCTION_SET.iter().filter(|i| i.class == class).count();

    assert_eq!(count(OpcodeClass::Official), 151);
    assert_eq!(count(OpcodeClass::Unofficial), 88);
    assert_eq!(count(OpcodeClass::Halt), 12);
    assert_eq!(count(OpcodeClass::Unstable), 5);

    let halts: Vec<u8> = INSTRUCTION_SET
        .iter()
        .filter(|i| i.operation == Operation::Jam)
        .map(|i| i.opcode)
        .collect();
    assert_eq!(
        halts,
        vec![0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2]
    );
}

#[test]
fn test_instruction_lengths() {
    let length = |opcode| INSTRUCTION_SET.lookup(opcode).bytes();

    assert_eq!(length(0xEA), 1); // NOP
    assert_eq!(length(0x0A), 1); // ASL A
    assert_eq!(length(0xA9), 2); // LDA #
    assert_eq!(length(0x80), 2); // NOP #
    assert_eq!(length(0x04), 2); // NOP zp
    assert_eq!(length(0x0C), 3); // NOP abs
    assert_eq!(length(0x6C), 3); // JMP (ind)
    assert_eq!(length(0x02), 1); // JAM
    assert_eq!(length(0x93), 2); // SHA (zp),Y
    assert_eq!(length(0x9E), 3); // SHX abs,Y
}

#[test]
fn test_instruction_base_cycles() {
    let cycles = |opcode| INSTRUCTION_SET.lookup(opcode).cycles;

    assert_eq!(cycles(0x00), 7); // BRK
    assert_eq!(cycles(0x91), 6); // STA (zp),Y
    assert_eq!(cycles(0x13), 8); // SLO (zp),Y
    assert_eq!(cycles(0x6C), 5); // JMP (ind)
    assert_eq!(cycles(0x4C), 3); // JMP abs
    assert_eq!(cycles(0xBB), 4); // LAS abs,Y
    assert_eq!(cycles(0xDF), 7); // DCP abs,X
}

//////////////////////////////////////////////////////////////////////
// TEST INSTRUCTION SET
//////////////////////////////////////////////////////////////////////

#[test]
fn test_load_instruction_LDA() {
    let mut cpu = InternalCpu::default();

    operations::lda(&mut cpu, 0);
    assert_eq!(cpu.acc, 0);
    assert!(cpu.sr.get(Zero));
    assert!(!cpu.sr.get(Negative));

    operations::lda(&mut cpu, 0x95);
    assert_eq!(cpu.acc, 0x95);
    assert!(!cpu.sr.get(Zero));
    assert!(cpu.sr.get(Negative));
}

#[test]
fn test_store_instructions() {
    let cpu = InternalCpu {
        acc: 0x95,
        x_reg: 0x0F,
        y_reg: 0x42,
        ..Default::default()
    };
    assert_eq!(operations::sta(&cpu), 0x95);
    assert_eq!(operations::stx(&cpu), 0x0F);
    assert_eq!(operations::sty(&cpu), 0x42);
    assert_eq!(operations::sax(&cpu), 0x05);
}

#[test]
fn test_transfer_instruction_TXS_doesnt_touch_flags() {
    let mut cpu = InternalCpu {
        x_reg: 0,
        ..Default::default()
    };
    operations::txs(&mut cpu);
    assert_eq!(cpu.sp, 0);
    assert!(!cpu.sr.get(Zero));
}

#[test]
fn test_arithmetic_instruction_ADC() {
    let mut cpu = InternalCpu {
        acc: 0x7F,
        ..Default::default()
    };

    operations::adc(&mut cpu, 0x01);
    assert_eq!(cpu.acc, 0x80);
    assert!(cpu.sr.get(Overflow));
    assert!(cpu.sr.get(Negative));
    assert!(!cpu.sr.get(Carry));
    assert!(!cpu.sr.get(Zero));

    cpu.acc = 0xFF;
    operations::adc(&mut cpu, 0x01);
    assert_eq!(cpu.acc, 0x00);
    assert!(cpu.sr.get(Carry));
    assert!(cpu.sr.get(Zero));
    assert!(!cpu.sr.get(Overflow));

    // carry in
    cpu.acc = 0x10;
    operations::adc(&mut cpu, 0x10);
    assert_eq!(cpu.acc, 0x21);
    assert!(!cpu.sr.get(Carry));
}

#[test]
fn test_arithmetic_instruction_SBC() {
    let mut cpu = InternalCpu {
        acc: 0x50,
        ..Default::default()
    };
    cpu.sr.set(Carry);

    operations::sbc(&mut cpu, 0xB0);
    assert_eq!(cpu.acc, 0xA0);
    assert!(cpu.sr.get(Overflow));
    assert!(cpu.sr.get(Negative));
    assert!(!cpu.sr.get(Carry));

    // borrow
    cpu.acc = 0x10;
    operations::sbc(&mut cpu, 0x0F);
    assert_eq!(cpu.acc, 0x00);
    assert!(cpu.sr.get(Zero));
    assert!(cpu.sr.get(Carry));
}

#[test]
fn test_decimal_ADC() {
    let mut cpu = decimal_cpu();

    cpu.acc = 0x25;
    operations::adc(&mut cpu, 0x48);
    assert_eq!(cpu.acc, 0x73);
    assert!(!cpu.sr.get(Carry));

    cpu.acc = 0x75;
    operations::adc(&mut cpu, 0x48);
    assert_eq!(cpu.acc, 0x23);
    assert!(cpu.sr.get(Carry));

    // 99 + 0 + carry
    cpu.acc = 0x99;
    operations::adc(&mut cpu, 0x00);
    assert_eq!(cpu.acc, 0x00);
    assert!(cpu.sr.get(Carry));
}

#[test]
fn test_decimal_SBC() {
    let mut cpu = decimal_cpu();
    cpu.sr.set(Carry);

    cpu.acc = 0x42;
    operations::sbc(&mut cpu, 0x13);
    assert_eq!(cpu.acc, 0x29);
    assert!(cpu.sr.get(Carry));

    cpu.acc = 0x23;
    operations::sbc(&mut cpu, 0x48);
    assert_eq!(cpu.acc, 0x75);
    assert!(!cpu.sr.get(Carry));
}

#[test]
fn test_decimal_round_trip() {
    for a in 0..100 {
        for b in 0..100 {
            for carry_in in [false, true] {
                let mut cpu = decimal_cpu();
                cpu.acc = bcd(a);
                cpu.sr.set_value(Carry, carry_in);

                operations::adc(&mut cpu, bcd(b));
                let sum = a as u16 + b as u16 + carry_in as u16;
                assert_eq!(cpu.acc, bcd((sum % 100) as u8));
                let carry_out = cpu.sr.get(Carry);
                assert_eq!(carry_out, sum >= 100);

                // subtract with the same carry taken as borrow
                cpu.sr.set_value(Carry, !carry_in);
                operations::sbc(&mut cpu, bcd(b));
                assert_eq!(cpu.acc, bcd(a), "{a} + {b} + {carry_in}");
                assert_eq!(cpu.sr.get(Carry), !carry_out, "{a} + {b} + {carry_in}");
            }
        }
    }
}

#[test]
fn test_decimal_mode_disabled() {
    let mut cpu = InternalCpu {
        acc: 0x09,
        decimal_mode: false,
        ..Default::default()
    };
    cpu.sr.set(Decimal);

    operations::adc(&mut cpu, 0x01);
    assert_eq!(cpu.acc, 0x0A);

    cpu.sr.set(Carry);
    operations::sbc(&mut cpu, 0x01);
    assert_eq!(cpu.acc, 0x09);
}

#[test]
fn test_compare_instructions() {
    let mut cpu = InternalCpu {
        acc: 0x40,
        x_reg: 0x40,
        y_reg: 0x10,
        ..Default::default()
    };

    operations::cmp(&mut cpu, 0x40);
    assert!(cpu.sr.get(Zero));
    assert!(cpu.sr.get(Carry));
    assert!(!cpu.sr.get(Negative));

    operations::cpx(&mut cpu, 0x41);
    assert!(!cpu.sr.get(Zero));
    assert!(!cpu.sr.get(Carry));
    assert!(cpu.sr.get(Negative));

    operations::cpy(&mut cpu, 0x01);
    assert!(cpu.sr.get(Carry));
    assert!(!cpu.sr.get(Negative));
}

#[test]
fn test_shift_instructions() {
    let mut cpu = InternalCpu::default();

    assert_eq!(operations::asl(&mut cpu, 0x81), 0x02);
    assert!(cpu.sr.get(Carry));

    assert_eq!(operations::lsr(&mut cpu, 0x81), 0x40);
    assert!(cpu.sr.get(Carry));
    assert!(!cpu.sr.get(Negative));

    // carry goes into bit 7, so N mirrors the old carry
    assert_eq!(operations::ror(&mut cpu, 0x02), 0x81);
    assert!(!cpu.sr.get(Carry));
    assert!(cpu.sr.get(Negative));

    cpu.sr.set(Carry);
    assert_eq!(operations::rol(&mut cpu, 0x80), 0x01);
    assert!(cpu.sr.get(Carry));
}

#[test]
fn test_bit_instruction_BIT() {
    let mut cpu = InternalCpu {
        acc: 0x01,
        ..Default::default()
    };

    operations::bit(&mut cpu, 0xC0);
    assert!(cpu.sr.get(Zero));
    assert!(cpu.sr.get(Negative));
    assert!(cpu.sr.get(Overflow));

    operations::bit(&mut cpu, 0x01);
    assert!(!cpu.sr.get(Zero));
    assert!(!cpu.sr.get(Negative));
    assert!(!cpu.sr.get(Overflow));
}

#[test]
fn test_unofficial_immediate_instructions() {
    let mut cpu = InternalCpu {
        acc: 0xFF,
        ..Default::default()
    };
    operations::anc(&mut cpu, 0x80);
    assert_eq!(cpu.acc, 0x80);
    assert!(cpu.sr.get(Carry));

    cpu.acc = 0xFF;
    operations::alr(&mut cpu, 0x03);
    assert_eq!(cpu.acc, 0x01);
    assert!(cpu.sr.get(Carry));

    cpu.acc = 0xFF;
    cpu.sr.clear(Carry);
    operations::arr(&mut cpu, 0x03);
    assert_eq!(cpu.acc, 0x01);
    assert!(cpu.sr.get(Carry));

    cpu.x_reg = 0x0F;
    operations::xaa(&mut cpu, 0x3C);
    assert_eq!(cpu.acc, 0x0C);

    cpu.acc = 0x00;
    operations::lxa(&mut cpu, 0x3F);
    assert_eq!(cpu.acc, 0x2E);
    assert_eq!(cpu.x_reg, 0x2E);
}

#[test]
fn test_unofficial_instruction_SBX() {
    let mut cpu = InternalCpu {
        acc: 0xF0,
        x_reg: 0x3C,
        ..Default::default()
    };

    operations::sbx(&mut cpu, 0x10);
    assert_eq!(cpu.x_reg, 0x20);
    assert!(cpu.sr.get(Carry));

    cpu.acc = 0x01;
    cpu.x_reg = 0x01;
    operations::sbx(&mut cpu, 0x02);
    assert_eq!(cpu.x_reg, 0xFF);
    assert!(!cpu.sr.get(Carry));
    assert!(cpu.sr.get(Negative));
}

#[test]
fn test_unofficial_instruction_LAS() {
    let mut cpu = InternalCpu {
        sp: 0xF3,
        ..Default::default()
    };

    operations::las(&mut cpu, 0x3F);
    assert_eq!(cpu.acc, 0x33);
    assert_eq!(cpu.x_reg, 0x33);
    assert_eq!(cpu.sp, 0x33);
}
