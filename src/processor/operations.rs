//! 6502 operations on the register file
//!
//! Each function implements the data path of one operation. Operand
//! fetching, stack traffic and timing are handled by the `Cpu`, so these
//! only see an operand value (or return the value to be stored).

use crate::processor::internal_cpu::InternalCpu;
use crate::processor::status_register::StatusRegisterFlag::*;
use crate::utils;

// Transfer instructions

/// LDA - Load Accumulator with Memory
///
/// Operation:
/// M -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn lda(cpu: &mut InternalCpu, operand: u8) {
    cpu.acc = operand;
    cpu.sr.set_zero_negative(cpu.acc);
}

/// LDX - Load Index X with Memory
///
/// Operation:
/// M -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ldx(cpu: &mut InternalCpu, operand: u8) {
    cpu.x_reg = operand;
    cpu.sr.set_zero_negative(cpu.x_reg);
}

/// LDY - Load Index Y with Memory
///
/// Operation:
/// M -> Y
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ldy(cpu: &mut InternalCpu, operand: u8) {
    cpu.y_reg = operand;
    cpu.sr.set_zero_negative(cpu.y_reg);
}

/// STA - Store Accumulator in Memory
///
/// Operation:
/// A -> M
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn sta(cpu: &InternalCpu) -> u8 {
    cpu.acc
}

/// STX - Store Index X in Memory
///
/// Operation:
/// X -> M
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn stx(cpu: &InternalCpu) -> u8 {
    cpu.x_reg
}

/// STY - Store Index Y in Memory
///
/// Operation:
/// Y -> M
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn sty(cpu: &InternalCpu) -> u8 {
    cpu.y_reg
}

/// TAX - Transfer Accumulator to Index X
///
/// Operation:
/// A -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn tax(cpu: &mut InternalCpu) {
    cpu.x_reg = cpu.acc;
    cpu.sr.set_zero_negative(cpu.x_reg);
}

/// TAY - Transfer Accumulator to Index Y
///
/// Operation:
/// A -> Y
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn tay(cpu: &mut InternalCpu) {
    cpu.y_reg = cpu.acc;
    cpu.sr.set_zero_negative(cpu.y_reg);
}

/// TSX - Transfer Stack Pointer to Index X
///
/// Operation:
/// SP -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn tsx(cpu: &mut InternalCpu) {
    cpu.x_reg = cpu.sp;
    cpu.sr.set_zero_negative(cpu.x_reg);
}

/// TXA - Transfer Index X to Accumulator
///
/// Operation:
/// X -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn txa(cpu: &mut InternalCpu) {
    cpu.acc = cpu.x_reg;
    cpu.sr.set_zero_negative(cpu.acc);
}

/// TXS - Transfer Index X to Stack Register
///
/// Operation:
/// X -> SP
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn txs(cpu: &mut InternalCpu) {
    cpu.sp = cpu.x_reg;
}

/// TYA - Transfer Index Y to Accumulator
///
/// Operation:
/// Y -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn tya(cpu: &mut InternalCpu) {
    cpu.acc = cpu.y_reg;
    cpu.sr.set_zero_negative(cpu.acc);
}

// Decrements and increments

/// DEC - Decrement Memory by One
///
/// Operation:
/// M - 1 -> M
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dec(cpu: &mut InternalCpu, operand: u8) -> u8 {
    let result = operand.wrapping_sub(1);
    cpu.sr.set_zero_negative(result);
    result
}

/// DEX - Decrement Index X by One
pub fn dex(cpu: &mut InternalCpu) {
    cpu.x_reg = cpu.x_reg.wrapping_sub(1);
    cpu.sr.set_zero_negative(cpu.x_reg);
}

/// DEY - Decrement Index Y by One
pub fn dey(cpu: &mut InternalCpu) {
    cpu.y_reg = cpu.y_reg.wrapping_sub(1);
    cpu.sr.set_zero_negative(cpu.y_reg);
}

/// INC - Increment Memory by One
///
/// Operation:
/// M + 1 -> M
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn inc(cpu: &mut InternalCpu, operand: u8) -> u8 {
    let result = operand.wrapping_add(1);
    cpu.sr.set_zero_negative(result);
    result
}

/// INX - Increment Index X by One
pub fn inx(cpu: &mut InternalCpu) {
    cpu.x_reg = cpu.x_reg.wrapping_add(1);
    cpu.sr.set_zero_negative(cpu.x_reg);
}

/// INY - Increment Index Y by One
pub fn iny(cpu: &mut InternalCpu) {
    cpu.y_reg = cpu.y_reg.wrapping_add(1);
    cpu.sr.set_zero_negative(cpu.y_reg);
}

// Arithmetic operations

/// ADC - Add Memory to Accumulator with Carry
///
/// Operation:
/// A + M + C -> A, C
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn adc(cpu: &mut InternalCpu, operand: u8) {
    if cpu.decimal_mode && cpu.sr.get(Decimal) {
        decimal_adc(cpu, operand);
    } else {
        binary_adc(cpu, operand);
    }
}

fn binary_adc(cpu: &mut InternalCpu, operand: u8) {
    let carry = cpu.sr.get(Carry) as u16;
    let result = cpu.acc as u16 + operand as u16 + carry;
    let overflow = !(cpu.acc ^ operand) & (cpu.acc ^ result as u8) & 0x80 != 0;

    cpu.acc = result as u8;
    cpu.sr.set_zero_negative(cpu.acc);
    cpu.sr.set_value(Carry, result > 0xFF);
    cpu.sr.set_value(Overflow, overflow);
}

// Nibble-wise BCD addition. Zero comes from the binary sum while N and V are
// taken after the low nibble adjustment, as the NMOS part does
fn decimal_adc(cpu: &mut InternalCpu, operand: u8) {
    let acc = cpu.acc as u16;
    let operand = operand as u16;
    let carry = cpu.sr.get(Carry) as u16;

    let mut low = (acc & 0x0F) + (operand & 0x0F) + carry;
    let mut high = (acc & 0xF0) + (operand & 0xF0);
    cpu.sr.set_value(Zero, (low + high) & 0xFF == 0);

    if low > 0x09 {
        low += 0x06;
        high += 0x10;
    }
    cpu.sr.set_value(Negative, high & 0x80 != 0);
    cpu.sr.set_value(Overflow, !(acc ^ operand) & (acc ^ high) & 0x80 != 0);

    if high > 0x90 {
        high += 0x60;
    }
    cpu.sr.set_value(Carry, high & 0xFF00 != 0);

    cpu.acc = ((low & 0x0F) | (high & 0xF0)) as u8;
}

/// SBC - Subtract Memory from Accumulator with Borrow
///
/// Operation:
/// A - M - !C -> A
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn sbc(cpu: &mut InternalCpu, operand: u8) {
    let acc = cpu.acc as i32;
    let operand = operand as i32;
    let borrow = !cpu.sr.get(Carry) as i32;

    // flags always follow the binary difference
    let result = acc - operand - borrow;
    cpu.sr.set_value(Overflow, (acc ^ operand) & (acc ^ result) & 0x80 != 0);
    cpu.sr.set_zero_negative(result as u8);
    cpu.sr.set_value(Carry, result & 0xFF00 == 0);

    if cpu.decimal_mode && cpu.sr.get(Decimal) {
        let mut low = (acc & 0x0F) - (operand & 0x0F) - borrow;
        let mut high = (acc & 0xF0) - (operand & 0xF0);
        if low & 0x10 != 0 {
            low -= 0x06;
            high -= 0x01;
        }
        if high & 0x100 != 0 {
            high -= 0x60;
        }
        cpu.acc = ((low & 0x0F) | (high & 0xF0)) as u8;
    } else {
        cpu.acc = result as u8;
    }
}

// Logical operations

/// AND - AND Memory with Accumulator
///
/// Operation:
/// A AND M -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn and(cpu: &mut InternalCpu, operand: u8) {
    cpu.acc &= operand;
    cpu.sr.set_zero_negative(cpu.acc);
}

/// EOR - Exclusive-OR Memory with Accumulator
///
/// Operation:
/// A EOR M -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn eor(cpu: &mut InternalCpu, operand: u8) {
    cpu.acc ^= operand;
    cpu.sr.set_zero_negative(cpu.acc);
}

/// ORA - OR Memory with Accumulator
///
/// Operation:
/// A OR M -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ora(cpu: &mut InternalCpu, operand: u8) {
    cpu.acc |= operand;
    cpu.sr.set_zero_negative(cpu.acc);
}

// Shift and rotate instructions

/// ASL - Shift Left One Bit (Memory or Accumulator)
///
/// Operation:
/// C <- [76543210] <- 0
///
/// Status Register
/// N Z C I D V
/// + + + - - -
pub fn asl(cpu: &mut InternalCpu, operand: u8) -> u8 {
    let result = operand << 1;
    cpu.sr.set_value(Carry, utils::bv(operand, 7) == 1);
    cpu.sr.set_zero_negative(result);
    result
}

/// LSR - Shift One Bit Right (Memory or Accumulator)
///
/// Operation:
/// 0 -> [76543210] -> C
///
/// Status Register
/// N Z C I D V
/// 0 + + - - -
pub fn lsr(cpu: &mut InternalCpu, operand: u8) -> u8 {
    let result = operand >> 1;
    cpu.sr.set_value(Carry, utils::bv(operand, 0) == 1);
    cpu.sr.set_zero_negative(result);
    result
}

/// ROL - Rotate One Bit Left (Memory or Accumulator)
///
/// Operation:
/// C <- [76543210] <- C
///
/// Status Register
/// N Z C I D V
/// + + + - - -
pub fn rol(cpu: &mut InternalCpu, operand: u8) -> u8 {
    let result = (operand << 1) | cpu.sr.get(Carry) as u8;
    cpu.sr.set_value(Carry, utils::bv(operand, 7) == 1);
    cpu.sr.set_zero_negative(result);
    result
}

/// ROR - Rotate One Bit Right (Memory or Accumulator)
///
/// Operation:
/// C -> [76543210] -> C
///
/// Status Register
/// N Z C I D V
/// + + + - - -
pub fn ror(cpu: &mut InternalCpu, operand: u8) -> u8 {
    let result = (operand >> 1) | ((cpu.sr.get(Carry) as u8) << 7);
    cpu.sr.set_value(Carry, utils::bv(operand, 0) == 1);
    cpu.sr.set_zero_negative(result);
    result
}

// Comparisons

fn compare(cpu: &mut InternalCpu, register: u8, operand: u8) {
    cpu.sr.set_value(Carry, register >= operand);
    cpu.sr.set_zero_negative(register.wrapping_sub(operand));
}

/// CMP - Compare Memory with Accumulator
///
/// Operation:
/// A - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cmp(cpu: &mut InternalCpu, operand: u8) {
    let acc = cpu.acc;
    compare(cpu, acc, operand);
}

/// CPX - Compare Memory and Index X
///
/// Operation:
/// X - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpx(cpu: &mut InternalCpu, operand: u8) {
    let x_reg = cpu.x_reg;
    compare(cpu, x_reg, operand);
}

/// CPY - Compare Memory and Index Y
///
/// Operation:
/// Y - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpy(cpu: &mut InternalCpu, operand: u8) {
    let y_reg = cpu.y_reg;
    compare(cpu, y_reg, operand);
}

// Other

/// BIT - Test Bits in Memory with Accumulator
///
/// Operation:
/// A AND M, M7 -> N, M6 -> V
///
/// Status Register
/// N  Z C I D V
/// M7 + - - - M6
pub fn bit(cpu: &mut InternalCpu, operand: u8) {
    cpu.sr.set_value(Zero, cpu.acc & operand == 0);
    cpu.sr.set_value(Negative, utils::bv(operand, 7) == 1);
    cpu.sr.set_value(Overflow, utils::bv(operand, 6) == 1);
}

// Unofficial instructions

/// SAX - Store Accumulator AND Index X
///
/// Operation:
/// A AND X -> M
pub fn sax(cpu: &InternalCpu) -> u8 {
    cpu.acc & cpu.x_reg
}

/// LAX - Load Accumulator and Index X with Memory
pub fn lax(cpu: &mut InternalCpu, operand: u8) {
    lda(cpu, operand);
    tax(cpu);
}

/// ANC - AND Memory with Accumulator, then copy N into C
pub fn anc(cpu: &mut InternalCpu, operand: u8) {
    and(cpu, operand);
    cpu.sr.set_value(Carry, cpu.sr.get(Negative));
}

/// ALR - AND Memory with Accumulator, then LSR the accumulator
pub fn alr(cpu: &mut InternalCpu, operand: u8) {
    and(cpu, operand);
    let acc = cpu.acc;
    cpu.acc = lsr(cpu, acc);
}

/// ARR - AND Memory with Accumulator, then ROR the accumulator
pub fn arr(cpu: &mut InternalCpu, operand: u8) {
    and(cpu, operand);
    let acc = cpu.acc;
    cpu.acc = ror(cpu, acc);
}

/// XAA - Transfer Index X to Accumulator, then AND Memory
pub fn xaa(cpu: &mut InternalCpu, operand: u8) {
    txa(cpu);
    and(cpu, operand);
}

/// LXA - OR the accumulator with the bus constant $EE, AND Memory and copy
/// the result into Index X
pub fn lxa(cpu: &mut InternalCpu, operand: u8) {
    ora(cpu, 0xEE);
    and(cpu, operand);
    tax(cpu);
}

/// SBX - (A AND X) - M -> X, flags as in CMP
pub fn sbx(cpu: &mut InternalCpu, operand: u8) {
    let value = cpu.acc & cpu.x_reg;
    compare(cpu, value, operand);
    cpu.x_reg = value.wrapping_sub(operand);
}

/// LAS - SP AND Memory -> A, X, SP
pub fn las(cpu: &mut InternalCpu, operand: u8) {
    let value = cpu.sp & operand;
    cpu.sp = value;
    cpu.x_reg = value;
    lda(cpu, value);
}
