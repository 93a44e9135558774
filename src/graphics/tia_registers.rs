//! TIA registers
//!
//! This module keeps the state written through the TIA register file and
//! provides a better way to manage its bits and bit groups

use bitflags::bitflags;

use crate::utils;

/// Movable graphic objects. Used to index per-object state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Object {
    Player0 = 0,
    Player1 = 1,
    Missile0 = 2,
    Missile1 = 3,
    Ball = 4,
}

impl Object {
    pub const ALL: [Object; 5] = [
        Object::Player0,
        Object::Player1,
        Object::Missile0,
        Object::Missile1,
        Object::Ball,
    ];
}

#[derive(Default)]
pub struct TiaRegisters {
    pub vsync: bool,
    pub vblank: bool,

    pub nusiz: [NumberSize; 2],
    pub colup: [u8; 2],
    pub colupf: u8,
    pub colubk: u8,
    pub ctrlpf: PlayfieldControl,
    pub refp: [bool; 2],

    /// PF0 (high nibble), PF1 and PF2 as written
    pub pf: [u8; 3],

    pub grp: [u8; 2],
    pub grp_delayed: [u8; 2],
    pub enam: [bool; 2],
    pub enabl: bool,
    pub enabl_delayed: bool,
    pub vdelp: [bool; 2],
    pub vdelbl: bool,
    pub resmp: [bool; 2],

    /// Signed horizontal motion per object, indexed by `Object`
    pub motion: [i8; 5],

    pub audc: [u8; 2],
    pub audf: [u8; 2],
    pub audv: [u8; 2],
}

impl TiaRegisters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // VSYNC and VBLANK

    #[inline]
    pub fn vertical_sync(&self) -> bool {
        self.vsync
    }

    #[inline]
    pub fn vertical_blank(&self) -> bool {
        self.vblank
    }

    // CTRLPF

    #[inline]
    pub fn playfield_reflected(&self) -> bool {
        self.ctrlpf.contains(PlayfieldControl::REFLECT)
    }

    #[inline]
    pub fn score_mode(&self) -> bool {
        self.ctrlpf.contains(PlayfieldControl::SCORE)
    }

    #[inline]
    pub fn playfield_priority(&self) -> bool {
        self.ctrlpf.contains(PlayfieldControl::PRIORITY)
    }

    #[inline]
    pub fn ball_size(&self) -> u16 {
        1 << utils::bvs(self.ctrlpf.bits(), 5, 4)
    }

    // PF0, PF1 and PF2

    /// Whether the playfield bit drawn at visible `pixel` is set. The 20
    /// playfield bits cover the left half of the screen, then they are
    /// repeated or mirrored on the right half
    pub fn playfield_bit(&self, pixel: u16) -> bool {
        let mut index = ((pixel % 80) / 4) as u8;
        if pixel >= 80 && self.playfield_reflected() {
            index = 19 - index;
        }

        match index {
            // PF0 and PF2 are drawn starting from their least significant bit
            0..=3 => utils::bv(self.pf[0], 4 + index) == 1,
            4..=11 => utils::bv(self.pf[1], 11 - index) == 1,
            _ => utils::bv(self.pf[2], index - 12) == 1,
        }
    }

    // Graphics, honouring vertical delay

    #[inline]
    pub fn player_graphics(&self, player: usize) -> u8 {
        if self.vdelp[player] {
            self.grp_delayed[player]
        } else {
            self.grp[player]
        }
    }

    #[inline]
    pub fn ball_enabled(&self) -> bool {
        if self.vdelbl {
            self.enabl_delayed
        } else {
            self.enabl
        }
    }
}

bitflags! {
    #[derive(Default)]
    pub struct PlayfieldControl: u8 {
        /// Right half of the playfield mirrors the left one
        const REFLECT = 0b0000_0001;

        /// Playfield takes the player colors (left half P0, right half P1)
        const SCORE = 0b0000_0010;

        /// Playfield and ball are drawn in front of players and missiles
        const PRIORITY = 0b0000_0100;

        /// Ball width (1, 2, 4 or 8 pixels)
        const BALL_SIZE = 0b0011_0000;
    }
}

/// NUSIZx register view: number of copies and size of a player and its
/// missile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberSize(u8);

impl NumberSize {
    pub fn new(value: u8) -> Self {
        Self(value & 0b0011_0111)
    }

    #[inline]
    fn mode(&self) -> u8 {
        utils::bvs(self.0, 2, 0)
    }

    /// Horizontal offsets of each copy, relative to the object position
    pub fn copies(&self) -> &'static [u16] {
        match self.mode() {
            0b001 => &[0, 16],
            0b010 => &[0, 32],
            0b011 => &[0, 16, 32],
            0b100 => &[0, 64],
            0b110 => &[0, 32, 64],
            _ => &[0],
        }
    }

    /// Pixels each player graphics bit is stretched to
    pub fn player_scale(&self) -> u16 {
        match self.mode() {
            0b101 => 2,
            0b111 => 4,
            _ => 1,
        }
    }

    pub fn missile_size(&self) -> u16 {
        1 << utils::bvs(self.0, 5, 4)
    }

    /// Offset from the player position where a missile locked to its
    /// player (RESMPx) is centered
    pub fn missile_lock_offset(&self) -> u16 {
        match self.mode() {
            0b101 => 6,
            0b111 => 10,
            _ => 3,
        }
    }
}

bitflags! {
    /// The 15 collision latches. Latches are paired in the order they are
    /// read, two per collision register (bit 7 and bit 6)
    #[derive(Default)]
    pub struct Collisions: u16 {
        const M0_P1 = 1 << 0;
        const M0_P0 = 1 << 1;
        const M1_P0 = 1 << 2;
        const M1_P1 = 1 << 3;
        const P0_PF = 1 << 4;
        const P0_BL = 1 << 5;
        const P1_PF = 1 << 6;
        const P1_BL = 1 << 7;
        const M0_PF = 1 << 8;
        const M0_BL = 1 << 9;
        const M1_PF = 1 << 10;
        const M1_BL = 1 << 11;
        const BL_PF = 1 << 12;
        // bit 13 is not wired, CXBLPF has a single latch
        const P0_P1 = 1 << 14;
        const M0_M1 = 1 << 15;
    }
}

impl Collisions {
    /// Value of collision register `register` (CXM0P..CXPPMM)
    pub fn register(&self, register: u16) -> u8 {
        let pair = (self.bits() >> (2 * (register & 0x07))) as u8 & 0b11;
        (utils::bv(pair, 0) << 7) | (utils::bv(pair, 1) << 6)
    }
}
