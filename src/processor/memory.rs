use crate::interfaces::Memory;

/// Flat read/write memory. Addresses wrap around its size, so a 128-byte
/// RAM answers to any address the decoder hands it.
pub struct Ram {
    memory: Vec<u8>,
}

impl Ram {
    pub fn new(size: usize) -> Self {
        Self {
            memory: vec![0; size],
        }
    }

    /// A RAM covering the whole 16-bit address space
    pub fn full() -> Self {
        Self::new(0x10000)
    }

    /// Load `contents` array starting on `address`.
    pub fn load(&mut self, address: u16, contents: &[u8]) {
        for (i, byte) in contents.iter().enumerate() {
            let i = i as u16;
            self.write(address.wrapping_add(i), *byte);
        }
    }

    pub fn size(&self) -> usize {
        self.memory.len()
    }

    pub fn clear(&mut self) {
        self.memory.fill(0);
    }
}

impl Memory for Ram {
    fn read(&self, address: u16) -> u8 {
        self.memory[address as usize % self.memory.len()]
    }

    fn write(&mut self, address: u16, data: u8) {
        let index = address as usize % self.memory.len();
        self.memory[index] = data;
    }
}
