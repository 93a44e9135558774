/// Atari 2600 (VCS) emulator

mod bus;
mod cartridge;
mod console;
mod controller;
mod errors;
mod metrics;
mod settings;
mod utils;

pub mod graphics;
pub mod hardware;
pub mod interfaces;
pub mod processor;
pub mod riot;
pub mod types;

pub use cartridge::Cartridge;
pub use console::Console;
pub use controller::{Difficulty, Direction, InputEvent, Player, Switch};
pub use errors::{CartridgeError, VcsError};
pub use graphics::{Frame, Pixel};
pub use settings::VcsSettings;
