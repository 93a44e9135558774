use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::SystemBus;
use crate::graphics::tia::Tia;
use crate::interfaces::Memory;
use crate::riot::Riot;

pub type SharedTia = Rc<RefCell<Tia>>;
pub type SharedRiot = Rc<RefCell<Riot>>;
pub type SharedBus = Rc<RefCell<SystemBus>>;
pub type SharedMemory = Rc<RefCell<dyn Memory>>;
