/// Atari Video Computer System (VCS) abstraction.
///
/// This module defines the higher level abstractions to run the VCS
/// emulator. It defines the video game console `Console`, which wires the
/// processor, the TIA and the RIOT together and keeps them in lockstep.
/// To use it, create a Console instance, load a `Cartridge` from a ROM
/// file, put the game on the machine and `run` to start playing!
///
/// The processor and the TIA run cooperatively on a single thread. Each
/// instruction is executed first and the TIA is then clocked three dot
/// ticks per processor cycle, plus the ticks it stalled the processor
/// because of a WSYNC.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Sender};
use log::{debug, info};

use crate::bus::SystemBus;
use crate::cartridge::Cartridge;
use crate::controller::{Controls, InputEvent, Player};
use crate::errors::VcsError;
use crate::graphics::tia::Tia;
use crate::graphics::Frame;
use crate::hardware::{CPU_CLOCK_DIVIDER, FRAME_RATE, TICKS_PER_FRAME};
use crate::metrics::Collector;
use crate::processor::cpu::{Cpu, Registers};
use crate::riot::Riot;
use crate::settings::VcsSettings;
use crate::types::{SharedBus, SharedMemory, SharedRiot, SharedTia};

pub struct Console {
    settings: VcsSettings,

    cpu: Cpu,
    bus: SharedBus,
    tia: SharedTia,
    riot: SharedRiot,

    controls: Controls,
    input_sender: Sender<InputEvent>,

    // dot ticks run in the current frame, the overshoot of the previous
    // frame included
    frame_ticks: u32,
    last_frame: Option<Frame>,

    metrics: Collector,
}

impl Console {
    pub fn new(settings: VcsSettings) -> Result<Self, VcsError> {
        let tia = Rc::new(RefCell::new(Tia::new()));
        let riot = Rc::new(RefCell::new(Riot::new()));
        let bus = Rc::new(RefCell::new(SystemBus::new(
            Rc::clone(&tia),
            Rc::clone(&riot),
        )));

        let memory: SharedMemory = bus.clone();
        let cpu = Cpu::builder()
            .memory(memory)
            .decimal_mode(settings.decimal_mode)
            .build()?;

        let (input_sender, input_receiver) = unbounded();

        Ok(Self {
            settings,
            cpu,
            bus,
            tia,
            riot,
            controls: Controls::new(input_receiver),
            input_sender,
            frame_ticks: 0,
            last_frame: None,
            metrics: Collector::new(),
        })
    }

    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        info!("Cartridge inserted: {}", cartridge);
        self.bus.borrow_mut().insert_cartridge(cartridge);
        self.reset();
    }

    /// Power cycle the console. RAM contents are kept
    pub fn reset(&mut self) {
        info!("VCS reset");
        self.tia.borrow_mut().reset();
        self.riot.borrow_mut().reset();
        self.cpu.reset();
        self.frame_ticks = 0;
        self.last_frame = None;
    }

    /// Channel to send joystick and console switch events to the console
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input_sender.clone()
    }

    pub fn registers(&self) -> Registers {
        self.cpu.registers()
    }

    pub fn tia(&self) -> SharedTia {
        Rc::clone(&self.tia)
    }

    /// Execute one instruction and clock the rest of the console for as
    /// long as it took. Return the processor cycles spent, WSYNC stall
    /// included
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.run_instruction();
        let ticks = cycles * CPU_CLOCK_DIVIDER;

        let stall = self.tia.borrow_mut().tick(ticks);
        let total = cycles + stall / CPU_CLOCK_DIVIDER;

        self.riot.borrow_mut().clock(total);
        self.frame_ticks += ticks + stall;
        self.metrics.observe_cycles(total);

        total
    }

    /// Run the console for a frame worth of dot ticks (1/60 s). Ticks run
    /// past the end of the frame are taken from the next one
    pub fn run_frame(&mut self) -> Result<(), VcsError> {
        if self.bus.borrow().cartridge().is_none() {
            return Err(VcsError::NoCartridgeInserted);
        }

        self.poll_input()?;

        while self.frame_ticks < TICKS_PER_FRAME {
            self.step();

            let published = self.tia.borrow_mut().take_frame();
            if let Some(frame) = published {
                self.metrics.observe_frame_ready();
                self.last_frame = Some(frame);
            }
        }
        self.frame_ticks -= TICKS_PER_FRAME;

        Ok(())
    }

    /// Take the last frame the TIA completed, if a new one is available
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.last_frame.take()
    }

    /// Blocking VCS run. Run `frames` frames or forever if `None`
    pub fn run(&mut self, frames: Option<usize>) -> Result<(), VcsError> {
        match frames {
            Some(frames) => info!("VCS running {frames} frames"),
            None => info!("VCS indefinitely running game"),
        }

        let frame_duration = Duration::from_secs(1) / FRAME_RATE;
        let mut frames_run = 0;

        while frames.map_or(true, |frames| frames_run < frames) {
            let frame_start = Instant::now();

            self.run_frame()?;
            frames_run += 1;

            if self.metrics.elapsed() >= self.settings.metrics_interval {
                let metrics = self.metrics.collect();
                debug!(
                    "{} frames/s, {} CPU cycles/s (over {:?})",
                    metrics.frames_per_second, metrics.cycles_per_second, metrics.recorded_time
                );
            }

            if self.settings.frame_throttle {
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    std::thread::sleep(frame_duration - elapsed);
                }
            }
        }

        Ok(())
    }

    fn poll_input(&mut self) -> Result<(), VcsError> {
        if self.controls.poll()? == 0 {
            return Ok(());
        }

        let mut riot = self.riot.borrow_mut();
        riot.set_port_a_pins(self.controls.port_a());
        riot.set_port_b_pins(self.controls.port_b());

        let mut tia = self.tia.borrow_mut();
        tia.set_fire_button(0, self.controls.fire(Player::One));
        tia.set_fire_button(1, self.controls.fire(Player::Two));

        Ok(())
    }
}
