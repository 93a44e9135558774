/// TIA module
///
/// This module emulates the VCS Television Interface Adaptor (TIA).
///
/// There is no frame buffer on the real chip: the program has to feed the
/// TIA registers while the beam sweeps the screen ("racing the beam"). The
/// TIA is clocked with the dot clock, three ticks per processor cycle, and
/// draws one pixel per tick on the visible part of a scanline.
///
/// TIA registers are mirrored all over the $0000-$007F area (and its
/// mirrors): writes decode 6 address bits and reads decode only 3.
use log::{debug, trace};

use crate::graphics::tia_registers::{Collisions, NumberSize, Object, PlayfieldControl, TiaRegisters};
use crate::graphics::{Frame, FramePixel, Pixel};
use crate::hardware::*;
use crate::interfaces::Memory;
use crate::utils;

pub struct Tia {
    registers: TiaRegisters,
    collisions: Collisions,

    /// Draw origin (beam x) of every movable object, indexed by `Object`
    positions: [u16; 5],

    beam: Beam,
    wsync: bool,

    fire_buttons: [bool; 2],

    frame: Frame,
    published_frame: Option<Frame>,
}

/// Beam position. `x` counts dot clocks since the start of the scanline
/// (horizontal blank included) and `y` is the vertical counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Beam {
    pub x: u16,
    pub y: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamState {
    VerticalSync,
    VerticalBlank,
    HorizontalBlank,
    Visible,
}

/// Objects present at a single dot
#[derive(Default)]
struct Dot {
    playfield: bool,
    ball: bool,
    player0: bool,
    player1: bool,
    missile0: bool,
    missile1: bool,
}

impl Tia {
    pub fn new() -> Self {
        Self {
            registers: TiaRegisters::default(),
            collisions: Collisions::empty(),
            positions: [HORIZONTAL_BLANK_TICKS; 5],
            beam: Beam::default(),
            wsync: false,
            fire_buttons: [false; 2],
            frame: Frame::black(),
            published_frame: None,
        }
    }

    pub fn reset(&mut self) {
        let fire_buttons = self.fire_buttons;
        *self = Self::new();
        self.fire_buttons = fire_buttons;
    }

    pub fn beam(&self) -> Beam {
        self.beam
    }

    pub fn beam_state(&self) -> BeamState {
        if self.registers.vertical_sync() {
            BeamState::VerticalSync
        } else if self.registers.vertical_blank() {
            BeamState::VerticalBlank
        } else if self.beam.x < HORIZONTAL_BLANK_TICKS {
            BeamState::HorizontalBlank
        } else {
            BeamState::Visible
        }
    }

    pub fn registers(&self) -> &TiaRegisters {
        &self.registers
    }

    pub fn collisions(&self) -> Collisions {
        self.collisions
    }

    pub fn object_position(&self, object: Object) -> u16 {
        self.positions[object as usize]
    }

    /// Frame being drawn right now
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_ready(&self) -> bool {
        self.published_frame.is_some()
    }

    /// Take the last complete frame, if any was published since the last
    /// call
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.published_frame.take()
    }

    // Input ports
    // -----------

    pub fn set_fire_button(&mut self, player: usize, pressed: bool) {
        self.fire_buttons[player] = pressed;
    }

    /// Read INPT0-INPT5. Only the joystick fire buttons (INPT4 and INPT5)
    /// are wired, active low on bit 7
    pub fn read_input(&self, address: u16) -> u8 {
        let pressed = match address & 0x0F {
            INPT4 => self.fire_buttons[0],
            INPT5 => self.fire_buttons[1],
            _ => return 0,
        };

        if pressed {
            0
        } else {
            0x80
        }
    }

    // Clock
    // -----

    /// Advance the beam `ticks` dot clocks, drawing the pixels it sweeps.
    ///
    /// If a WSYNC was written since the last call, the rest of the scanline
    /// is drawn too. The number of extra ticks this took is returned, the
    /// processor is halted during that time
    pub fn tick(&mut self, ticks: u32) -> u32 {
        let mut remaining = ticks;
        let mut new_scanline = false;

        while remaining > 0 {
            let span = remaining.min((SCANLINE_TICKS - self.beam.x) as u32) as u16;
            self.render(span);
            self.beam.x += span;
            remaining -= span as u32;

            if self.beam.x >= SCANLINE_TICKS {
                self.next_scanline();
                new_scanline = true;
            }
        }

        if !self.wsync {
            return 0;
        }
        self.wsync = false;

        // the beam already reached the next scanline
        if new_scanline {
            return 0;
        }

        let stall = SCANLINE_TICKS - self.beam.x;
        self.render(stall);
        self.next_scanline();

        stall as u32
    }

    fn next_scanline(&mut self) {
        let previous = self.beam.y;

        self.beam.x = 0;
        self.beam.y = if self.registers.vertical_sync() || self.registers.vertical_blank() {
            0
        } else {
            (self.beam.y + 1) % TOTAL_SCANLINES
        };

        if self.beam.y == 0 && previous != 0 {
            self.publish_frame();
        }
    }

    fn publish_frame(&mut self) {
        debug!("Frame published");
        self.published_frame = Some(self.frame.clone());
    }

    // Rendering
    // ---------

    /// Draw the pixels of the next `span` dots from the current beam
    /// position, without moving the beam
    fn render(&mut self, span: u16) {
        if self.registers.vertical_sync() || self.registers.vertical_blank() {
            return;
        }

        let start = self.beam.x.max(HORIZONTAL_BLANK_TICKS);
        let end = (self.beam.x + span).min(SCANLINE_TICKS);
        for x in start..end {
            self.render_dot(x);
        }
    }

    fn render_dot(&mut self, x: u16) {
        let pixel = x - HORIZONTAL_BLANK_TICKS;

        let dot = Dot {
            playfield: self.registers.playfield_bit(pixel),
            ball: self.ball_at(x),
            player0: self.player_at(0, x),
            player1: self.player_at(1, x),
            missile0: self.missile_at(0, x),
            missile1: self.missile_at(1, x),
        };

        self.update_collisions(&dot);

        let color = self.dot_color(&dot, pixel);
        self.frame.set_pixel(
            Pixel::from(color),
            FramePixel {
                row: self.beam.y as usize,
                col: pixel as usize,
            },
        );
    }

    fn player_at(&self, player: usize, x: u16) -> bool {
        let graphics = self.registers.player_graphics(player);
        if graphics == 0 {
            return false;
        }

        let nusiz = self.registers.nusiz[player];
        let scale = nusiz.player_scale();
        let position = self.positions[player];
        let reflected = self.registers.refp[player];

        nusiz.copies().iter().any(|offset| {
            let start = position + offset;
            if x < start || x >= start + 8 * scale {
                return false;
            }

            let index = ((x - start) / scale) as u8;
            let mask = if reflected { 1 << index } else { 0x80 >> index };
            graphics & mask != 0
        })
    }

    fn missile_at(&self, missile: usize, x: u16) -> bool {
        // a missile locked to its player is hidden
        if !self.registers.enam[missile] || self.registers.resmp[missile] {
            return false;
        }

        let nusiz = self.registers.nusiz[missile];
        let size = nusiz.missile_size();
        let position = self.positions[Object::Missile0 as usize + missile];

        nusiz.copies().iter().any(|offset| {
            let start = position + offset;
            x >= start && x < start + size
        })
    }

    fn ball_at(&self, x: u16) -> bool {
        let position = self.positions[Object::Ball as usize];
        self.registers.ball_enabled() && x >= position && x < position + self.registers.ball_size()
    }

    fn update_collisions(&mut self, dot: &Dot) {
        let latches = [
            (Collisions::M0_P1, dot.missile0 && dot.player1),
            (Collisions::M0_P0, dot.missile0 && dot.player0),
            (Collisions::M1_P0, dot.missile1 && dot.player0),
            (Collisions::M1_P1, dot.missile1 && dot.player1),
            (Collisions::P0_PF, dot.player0 && dot.playfield),
            (Collisions::P0_BL, dot.player0 && dot.ball),
            (Collisions::P1_PF, dot.player1 && dot.playfield),
            (Collisions::P1_BL, dot.player1 && dot.ball),
            (Collisions::M0_PF, dot.missile0 && dot.playfield),
            (Collisions::M0_BL, dot.missile0 && dot.ball),
            (Collisions::M1_PF, dot.missile1 && dot.playfield),
            (Collisions::M1_BL, dot.missile1 && dot.ball),
            (Collisions::BL_PF, dot.ball && dot.playfield),
            (Collisions::P0_P1, dot.player0 && dot.player1),
            (Collisions::M0_M1, dot.missile0 && dot.missile1),
        ];

        for (latch, hit) in latches {
            if hit {
                self.collisions.insert(latch);
            }
        }
    }

    /// Color register value of a dot after priority resolution
    fn dot_color(&self, dot: &Dot, pixel: u16) -> u8 {
        let registers = &self.registers;

        let playfield_color = if registers.score_mode() && dot.playfield {
            if pixel < SCREEN_WIDTH as u16 / 2 {
                registers.colup[0]
            } else {
                registers.colup[1]
            }
        } else {
            registers.colupf
        };

        let player0 = dot.player0 || dot.missile0;
        let player1 = dot.player1 || dot.missile1;
        let playfield = dot.playfield || dot.ball;

        if registers.playfield_priority() && playfield {
            playfield_color
        } else if player0 {
            registers.colup[0]
        } else if player1 {
            registers.colup[1]
        } else if playfield {
            playfield_color
        } else {
            registers.colubk
        }
    }

    // Object positioning
    // ------------------

    /// Beam position latched by a RESxx write. Objects reset during the
    /// horizontal blank start at the left edge of the screen
    fn reset_position(&self) -> u16 {
        self.beam.x.max(HORIZONTAL_BLANK_TICKS)
    }

    fn lock_missile(&mut self, missile: usize) {
        let offset = self.registers.nusiz[missile].missile_lock_offset();
        self.positions[Object::Missile0 as usize + missile] = self.positions[missile] + offset;
    }

    fn apply_horizontal_motion(&mut self) {
        for object in Object::ALL {
            let index = object as usize;

            let locked_missile = match object {
                Object::Missile0 | Object::Missile1 => self.registers.resmp[index - 2],
                _ => false,
            };
            if locked_missile {
                self.lock_missile(index - 2);
                continue;
            }

            let moved = self.positions[index] as i16 - self.registers.motion[index] as i16;
            self.positions[index] = wrap_position(moved);
        }
    }
}

/// Keep an object position inside the visible part of the scanline
fn wrap_position(position: i16) -> u16 {
    let visible = SCREEN_WIDTH as i16;

    let wrapped = if position >= SCANLINE_TICKS as i16 {
        position - visible
    } else if position < HORIZONTAL_BLANK_TICKS as i16 {
        position + visible
    } else {
        position
    };

    wrapped as u16
}

impl Default for Tia {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory for Tia {
    fn read(&self, address: u16) -> u8 {
        self.collisions.register(address & TIA_READ_MASK)
    }

    fn write(&mut self, address: u16, data: u8) {
        let register = address & TIA_WRITE_MASK;
        let set = |bit| utils::bv(data, bit) == 1;

        match register {
            VSYNC => self.registers.vsync = set(1),
            VBLANK => self.registers.vblank = set(1),
            WSYNC => self.wsync = true,
            RSYNC => trace!("RSYNC ignored"),

            NUSIZ0 | NUSIZ1 => {
                self.registers.nusiz[(register - NUSIZ0) as usize] = NumberSize::new(data)
            }

            // bit 0 of color registers is not wired
            COLUP0 | COLUP1 => self.registers.colup[(register - COLUP0) as usize] = data & 0xFE,
            COLUPF => self.registers.colupf = data & 0xFE,
            COLUBK => self.registers.colubk = data & 0xFE,

            CTRLPF => self.registers.ctrlpf = PlayfieldControl::from_bits_truncate(data),
            REFP0 | REFP1 => self.registers.refp[(register - REFP0) as usize] = set(3),

            PF0 => self.registers.pf[0] = data & 0xF0,
            PF1 => self.registers.pf[1] = data,
            PF2 => self.registers.pf[2] = data,

            RESP0 | RESP1 => {
                let player = (register - RESP0) as usize;
                self.positions[player] = self.reset_position();
                if self.registers.resmp[player] {
                    self.lock_missile(player);
                }
            }
            RESM0 | RESM1 => {
                let missile = Object::Missile0 as usize + (register - RESM0) as usize;
                self.positions[missile] = self.reset_position();
            }
            RESBL => self.positions[Object::Ball as usize] = self.reset_position(),

            // sound is not produced, registers only keep their values
            AUDC0 | AUDC1 => self.registers.audc[(register - AUDC0) as usize] = data & 0x0F,
            AUDF0 | AUDF1 => self.registers.audf[(register - AUDF0) as usize] = data & 0x1F,
            AUDV0 | AUDV1 => self.registers.audv[(register - AUDV0) as usize] = data & 0x0F,

            GRP0 => {
                self.registers.grp[0] = data;
                self.registers.grp_delayed[1] = self.registers.grp[1];
            }
            GRP1 => {
                self.registers.grp[1] = data;
                self.registers.grp_delayed[0] = self.registers.grp[0];
                self.registers.enabl_delayed = self.registers.enabl;
            }
            ENAM0 | ENAM1 => self.registers.enam[(register - ENAM0) as usize] = set(1),
            ENABL => self.registers.enabl = set(1),

            HMP0..=HMBL => {
                self.registers.motion[(register - HMP0) as usize] = utils::signed_high_nibble(data)
            }

            VDELP0 | VDELP1 => self.registers.vdelp[(register - VDELP0) as usize] = set(0),
            VDELBL => self.registers.vdelbl = set(0),

            RESMP0 | RESMP1 => {
                let missile = (register - RESMP0) as usize;
                self.registers.resmp[missile] = set(1);
                if self.registers.resmp[missile] {
                    self.lock_missile(missile);
                }
            }

            HMOVE => self.apply_horizontal_motion(),
            HMCLR => self.registers.motion = [0; 5],
            CXCLR => self.collisions = Collisions::empty(),

            _ => trace!("Write to unused TIA register ${register:0>2X} ignored"),
        }
    }
}
