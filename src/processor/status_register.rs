use std::convert::From;

use crate::utils;

// Bring local enum variants to scope
use StatusRegisterFlag::*;

/// Bit 5 is not wired to anything and always reads back as 1
const UNUSED_BIT: u8 = 1 << 5;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusRegister {
    sr: u8,
}

impl StatusRegister {
    /// Power-on value: only interrupts are disabled
    pub fn power_on() -> Self {
        let mut sr = Self::default();
        sr.set(InterruptDisable);
        sr
    }

    pub fn get(&self, flag: StatusRegisterFlag) -> bool {
        utils::bv(self.sr, flag as u8) > 0
    }

    pub fn set(&mut self, flag: StatusRegisterFlag) {
        self.sr |= 1 << flag as u8;
    }

    pub fn clear(&mut self, flag: StatusRegisterFlag) {
        self.sr &= !(1 << flag as u8);
    }

    pub fn set_value(&mut self, flag: StatusRegisterFlag, condition: bool) {
        match condition {
            true => self.set(flag),
            false => self.clear(flag),
        }
    }

    /// Update Zero and Negative flags from `value`
    pub fn set_zero_negative(&mut self, value: u8) {
        self.set_value(Zero, value == 0);
        self.set_value(Negative, (value as i8) < 0);
    }

    /// Byte pushed to the stack. `brk` distinguishes software pushes (BRK,
    /// PHP) from hardware interrupts
    pub fn to_stack(&self, brk: bool) -> u8 {
        let mut value = self.sr | UNUSED_BIT;
        if brk {
            value |= 1 << Break as u8;
        } else {
            value &= !(1 << Break as u8);
        }
        value
    }

    /// Status pulled from the stack. Break and bit 5 don't exist as storage
    /// in the register, so they are dropped
    pub fn from_stack(value: u8) -> Self {
        Self {
            sr: value & !(UNUSED_BIT | (1 << Break as u8)),
        }
    }
}

impl From<u8> for StatusRegister {
    fn from(value: u8) -> Self {
        Self { sr: value }
    }
}

impl From<StatusRegister> for u8 {
    fn from(value: StatusRegister) -> Self {
        value.sr | UNUSED_BIT
    }
}

#[derive(Copy, Clone, Debug)]
pub enum StatusRegisterFlag {
    Negative = 7,
    Overflow = 6,
    // bit 5 is unused and is always 1
    Break = 4,
    Decimal = 3,
    InterruptDisable = 2,
    Zero = 1,
    Carry = 0,
}
