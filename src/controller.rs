//! Joysticks and console switches
//!
//! The host sends `InputEvent`s through a channel. Events are applied when
//! the console polls the channel, once per frame, and the resulting state
//! is presented to the RIOT ports and the TIA input ports.

use bitflags::bitflags;
use crossbeam_channel::{Receiver, TryRecvError};
use log::trace;

use crate::errors::VcsError;
use crate::riot::PORT_B_POWER_ON_PINS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    Reset,
    Select,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    /// Advanced
    A,
    /// Beginner
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Joystick {
        player: Player,
        direction: Direction,
        pressed: bool,
    },
    Fire {
        player: Player,
        pressed: bool,
    },
    Switch {
        switch: Switch,
        pressed: bool,
    },
    Difficulty {
        player: Player,
        difficulty: Difficulty,
    },
}

bitflags! {
    /// Port A pins, player one on the high nibble. A set flag means the
    /// direction is held
    struct Joysticks: u8 {
        const P0_RIGHT = 0b1000_0000;
        const P0_LEFT = 0b0100_0000;
        const P0_DOWN = 0b0010_0000;
        const P0_UP = 0b0001_0000;
        const P1_RIGHT = 0b0000_1000;
        const P1_LEFT = 0b0000_0100;
        const P1_DOWN = 0b0000_0010;
        const P1_UP = 0b0000_0001;
    }
}

bitflags! {
    /// Port B pins as they are read
    struct ConsoleSwitches: u8 {
        /// Low while pressed
        const RESET = 0b0000_0001;
        /// Low while pressed
        const SELECT = 0b0000_0010;
        /// High for color, low for black and white
        const COLOR = 0b0000_1000;
        /// High for A, low for B
        const P0_DIFFICULTY = 0b0100_0000;
        /// High for A, low for B
        const P1_DIFFICULTY = 0b1000_0000;
    }
}

pub struct Controls {
    input_channel: Receiver<InputEvent>,
    joysticks: Joysticks,
    switches: ConsoleSwitches,
    fire: [bool; 2],
}

impl Controls {
    pub fn new(input_channel: Receiver<InputEvent>) -> Self {
        Self {
            input_channel,
            joysticks: Joysticks::empty(),
            switches: ConsoleSwitches::from_bits_truncate(PORT_B_POWER_ON_PINS),
            fire: [false; 2],
        }
    }

    /// Apply every pending input event. Return how many were applied
    pub fn poll(&mut self) -> Result<usize, VcsError> {
        let mut applied = 0;

        loop {
            match self.input_channel.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(VcsError::InputChannelDisconnected)
                }
            }
        }

        Ok(applied)
    }

    pub fn apply(&mut self, event: InputEvent) {
        trace!("Input event: {event:?}");

        match event {
            InputEvent::Joystick {
                player,
                direction,
                pressed,
            } => {
                let flag = Self::direction_flag(player, direction);
                self.joysticks.set(flag, pressed);
            }
            InputEvent::Fire { player, pressed } => self.fire[player.index()] = pressed,
            InputEvent::Switch { switch, pressed } => {
                let flag = match switch {
                    Switch::Reset => ConsoleSwitches::RESET,
                    Switch::Select => ConsoleSwitches::SELECT,
                };
                self.switches.set(flag, !pressed);
            }
            InputEvent::Difficulty { player, difficulty } => {
                let flag = match player {
                    Player::One => ConsoleSwitches::P0_DIFFICULTY,
                    Player::Two => ConsoleSwitches::P1_DIFFICULTY,
                };
                self.switches.set(flag, difficulty == Difficulty::A);
            }
        }
    }

    /// Port A pins, active low
    pub fn port_a(&self) -> u8 {
        !self.joysticks.bits()
    }

    pub fn port_b(&self) -> u8 {
        self.switches.bits()
    }

    pub fn fire(&self, player: Player) -> bool {
        self.fire[player.index()]
    }

    fn direction_flag(player: Player, direction: Direction) -> Joysticks {
        let flag = match direction {
            Direction::Right => Joysticks::P0_RIGHT,
            Direction::Left => Joysticks::P0_LEFT,
            Direction::Down => Joysticks::P0_DOWN,
            Direction::Up => Joysticks::P0_UP,
        };

        match player {
            Player::One => flag,
            Player::Two => Joysticks::from_bits_truncate(flag.bits() >> 4),
        }
    }
}
