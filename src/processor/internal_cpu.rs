use crate::processor::status_register::StatusRegister;

/// Programmer-visible 6502 state. Operations work on this alone, memory
/// traffic is the `Cpu`'s business
#[derive(Clone, Debug)]
pub struct InternalCpu {
    pub acc: u8,   // Accumulator
    pub x_reg: u8, // X register
    pub y_reg: u8, // Y register
    pub sp: u8,    // Stack Pointer
    pub pc: u16,   // Program Counter
    pub sr: StatusRegister,

    // ADC/SBC honour the decimal flag only when this is set. Fixed at
    // construction time
    pub decimal_mode: bool,
}

impl Default for InternalCpu {
    fn default() -> Self {
        Self {
            acc: 0,
            x_reg: 0,
            y_reg: 0,
            sp: 0,
            pc: 0,
            sr: StatusRegister::default(),
            decimal_mode: true,
        }
    }
}
