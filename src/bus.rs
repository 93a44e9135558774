//! Console address decoder
//!
//! The 6507 exposes 13 address lines. Devices are selected by a few of
//! them and ignore the rest, so every device shows up mirrored many times
//! in the address space.

use log::trace;

use crate::cartridge::Cartridge;
use crate::hardware::*;
use crate::interfaces::Memory;
use crate::types::{SharedRiot, SharedTia};

pub struct SystemBus {
    tia: SharedTia,
    riot: SharedRiot,
    cartridge: Option<Cartridge>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Device {
    Ram,
    Riot,
    TiaInputs,
    Tia,
    Cartridge,
}

impl SystemBus {
    pub fn new(tia: SharedTia, riot: SharedRiot) -> Self {
        Self {
            tia,
            riot,
            cartridge: None,
        }
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    fn decode_read(address: u16) -> Device {
        if address & RAM_SELECT_MASK == RAM_SELECT {
            Device::Ram
        } else if address & RIOT_SELECT_MASK == RIOT_SELECT {
            Device::Riot
        } else if address & TIA_INPUT_SELECT_MASK == TIA_INPUT_SELECT {
            Device::TiaInputs
        } else if address & TIA_SELECT_MASK == TIA_SELECT {
            Device::Tia
        } else {
            Device::Cartridge
        }
    }

    fn decode_write(address: u16) -> Device {
        if address & RAM_SELECT_MASK == RAM_SELECT {
            Device::Ram
        } else if address & TIA_SELECT_MASK == TIA_SELECT {
            Device::Tia
        } else if address & RIOT_SELECT_MASK == RIOT_SELECT {
            Device::Riot
        } else {
            Device::Cartridge
        }
    }
}

impl Memory for SystemBus {
    fn read(&self, address: u16) -> u8 {
        let address = address & ADDRESS_MASK;

        match Self::decode_read(address) {
            // RAM lives inside the RIOT chip
            Device::Ram | Device::Riot => self.riot.borrow().read(address),
            Device::TiaInputs => self.tia.borrow().read_input(address),
            Device::Tia => self.tia.borrow().read(address),
            Device::Cartridge => match &self.cartridge {
                Some(cartridge) => cartridge.read(address),
                None => 0,
            },
        }
    }

    fn write(&mut self, address: u16, data: u8) {
        let address = address & ADDRESS_MASK;

        match Self::decode_write(address) {
            Device::Ram | Device::Riot => self.riot.borrow_mut().write(address, data),
            Device::Tia => self.tia.borrow_mut().write(address, data),
            device => trace!("Write ${data:0>2X} to {device:?} (${address:0>4X}) ignored"),
        }
    }
}
