//! MOS 6502 processor emulation

pub mod cpu;
pub mod instruction;
pub mod instruction_set;
pub mod memory;

#[cfg(test)]
mod tests;

mod internal_cpu;
mod operations;
mod status_register;
