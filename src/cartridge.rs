use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::{CartridgeError, VcsError};
use crate::hardware::{CARTRIDGE_ADDRESS_MASK, CARTRIDGE_WINDOW_SIZE};
use crate::interfaces::Memory;

const SUPPORTED_SIZES: [usize; 2] = [CARTRIDGE_WINDOW_SIZE / 2, CARTRIDGE_WINDOW_SIZE];

/// Game cartridge with a flat 2 kB or 4 kB ROM. Bank switching schemes of
/// bigger cartridges are not supported.
///
/// The cartridge is seen by the processor through a 4 kB window, 2 kB
/// images are mirrored twice on it.
pub struct Cartridge {
    name: String,
    rom: Vec<u8>,
}

impl Cartridge {
    /// Load a cartridge from a raw ROM image file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VcsError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let contents = fs::read(path).map_err(|source| VcsError::CartridgeError {
            details: format!("can't load cartridge {name}"),
            source: CartridgeError::Io {
                path: path.display().to_string(),
                source,
            },
        })?;

        Self::from_bytes(name, contents)
    }

    pub fn from_bytes<S: Into<String>>(name: S, rom: Vec<u8>) -> Result<Self, VcsError> {
        let name = name.into();

        let error = if rom.is_empty() {
            Some(CartridgeError::Empty)
        } else if !SUPPORTED_SIZES.contains(&rom.len()) {
            Some(CartridgeError::UnsupportedSize { size: rom.len() })
        } else {
            None
        };

        if let Some(source) = error {
            return Err(VcsError::CartridgeError {
                details: format!("invalid ROM image for {name}"),
                source,
            });
        }

        debug!("Cartridge {name}: {} bytes of ROM", rom.len());
        Ok(Self { name, rom })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.rom.len()
    }
}

impl std::fmt::Display for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} kB)", self.name, self.rom.len() / 1024)
    }
}

impl Memory for Cartridge {
    fn read(&self, address: u16) -> u8 {
        let offset = (address & CARTRIDGE_ADDRESS_MASK) as usize;
        self.rom[offset % self.rom.len()]
    }

    /// ROM can't be written
    fn write(&mut self, _address: u16, _data: u8) {}
}
