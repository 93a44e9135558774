//! 6532 RAM-I/O-Timer (RIOT)
//!
//! Also known as PIA. It holds the 128 bytes of console RAM, two 8-bit I/O
//! ports (joysticks on port A, console switches on port B) and an interval
//! timer clocked by the processor.

use std::cell::Cell;

use log::trace;

use crate::hardware::*;
use crate::interfaces::Memory;

/// Console switches released, color TV type and both difficulties on B
pub const PORT_B_POWER_ON_PINS: u8 = 0b0000_1011;

pub struct Riot {
    ram: [u8; RAM_SIZE],
    port_a: Port,
    port_b: Port,
    timer: Timer,
}

#[derive(Default)]
struct Port {
    output: u8,
    /// 1 = output, 0 = input
    direction: u8,
    /// Values driven by the devices plugged to the port
    pins: u8,
}

impl Port {
    fn new(pins: u8) -> Self {
        Self {
            pins,
            ..Default::default()
        }
    }

    /// A pin reads low if the device drives it low or if it is an output
    /// set to 0
    fn read(&self) -> u8 {
        (self.output | !self.direction) & self.pins
    }
}

struct Timer {
    counter: u8,
    interval: u32,
    prescaler: u32,
    /// Flag on bit 7 of TIMINT, cleared when read or on a timer write
    underflow: Cell<bool>,
    /// Flag on bit 6 of TIMINT
    underflow_sticky: bool,
}

impl Timer {
    fn new() -> Self {
        Self {
            counter: 0xFF,
            interval: 1,
            prescaler: 0,
            underflow: Cell::new(false),
            underflow_sticky: false,
        }
    }

    fn load(&mut self, value: u8, interval: u32) {
        self.counter = value;
        self.interval = interval;
        self.prescaler = 0;
        self.underflow.set(false);
    }

    fn step(&mut self) {
        self.prescaler += 1;
        if self.prescaler < self.interval {
            return;
        }
        self.prescaler = 0;

        if self.counter == 0 {
            // after an underflow the counter keeps going once per cycle
            self.counter = 0xFF;
            self.interval = 1;
            self.underflow.set(true);
            self.underflow_sticky = true;
        } else {
            self.counter -= 1;
        }
    }

    fn flags(&self) -> u8 {
        let flags = ((self.underflow.get() as u8) << 7) | ((self.underflow_sticky as u8) << 6);
        self.underflow.set(false);
        flags
    }
}

impl Riot {
    pub fn new() -> Self {
        Self {
            ram: [0; RAM_SIZE],
            port_a: Port::new(0xFF),
            port_b: Port::new(PORT_B_POWER_ON_PINS),
            timer: Timer::new(),
        }
    }

    /// Power-on state. RAM contents survive, like on a console reset
    pub fn reset(&mut self) {
        let ram = self.ram;
        let (pins_a, pins_b) = (self.port_a.pins, self.port_b.pins);

        *self = Self::new();
        self.ram = ram;
        self.port_a.pins = pins_a;
        self.port_b.pins = pins_b;
    }

    /// Advance the interval timer by `cycles` processor cycles
    pub fn clock(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.timer.step();
        }
    }

    pub fn timer(&self) -> u8 {
        self.timer.counter
    }

    pub fn set_port_a_pins(&mut self, pins: u8) {
        self.port_a.pins = pins;
    }

    pub fn set_port_b_pins(&mut self, pins: u8) {
        self.port_b.pins = pins;
    }

    fn timer_interval(address: u16) -> u32 {
        match address & 0x03 {
            0 => 1,
            1 => 8,
            2 => 64,
            _ => 1024,
        }
    }
}

impl Default for Riot {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory for Riot {
    fn read(&self, address: u16) -> u8 {
        if address & RIOT_IO_SELECT == 0 {
            return self.ram[(address & RAM_ADDRESS_MASK) as usize];
        }

        match address & 0x07 {
            SWCHA => self.port_a.read(),
            SWACNT => self.port_a.direction,
            SWCHB => self.port_b.read(),
            SWBCNT => self.port_b.direction,
            INTIM | 0x06 => self.timer.counter,
            _ => self.timer.flags(),
        }
    }

    fn write(&mut self, address: u16, data: u8) {
        if address & RIOT_IO_SELECT == 0 {
            self.ram[(address & RAM_ADDRESS_MASK) as usize] = data;
            return;
        }

        if address & RIOT_TIMER_SELECT == RIOT_TIMER_SELECT {
            let interval = Self::timer_interval(address);
            trace!("Timer set to {data} with an interval of {interval} cycles");
            self.timer.load(data, interval);
            return;
        }

        if address & 0x04 != 0 {
            trace!("Edge detect control ${address:0>4X} ignored");
            return;
        }

        match address & 0x03 {
            SWCHA => self.port_a.output = data,
            SWACNT => self.port_a.direction = data,
            SWCHB => self.port_b.output = data,
            _ => self.port_b.direction = data,
        }
    }
}
