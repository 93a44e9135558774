//! VCS graphics hardware emulation

pub mod palette;
pub mod tia;
pub mod tia_registers;

use crate::hardware::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel {
    red: u8,
    green: u8,
    blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel {
        red: 0,
        green: 0,
        blue: 0,
    };
    pub const WHITE: Pixel = Pixel {
        red: 0xFF,
        green: 0xFF,
        blue: 0xFF,
    };

    pub const fn new_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a pixel from a packed 0xRRGGBB value
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            red: (rgb >> 16) as u8,
            green: (rgb >> 8) as u8,
            blue: rgb as u8,
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }
}

/// Representation of a pixel in a Frame
pub struct FramePixel {
    pub row: usize,
    pub col: usize,
}

/// VCS screen frame representation. Its sizes cover the visible part of
/// every scanline of a frame (see hardware module)
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub inner: InnerFrame,
}

type InnerFrame = Vec<Vec<Pixel>>;

impl Frame {
    pub fn new(color: Pixel) -> Self {
        Self {
            inner: vec![vec![color; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    pub fn black() -> Self {
        Self::new(Pixel::BLACK)
    }

    pub fn set_pixel(&mut self, pixel: Pixel, position: FramePixel) {
        self.inner[position.row][position.col] = pixel;
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::black()
    }
}

impl std::ops::Deref for Frame {
    type Target = InnerFrame;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
