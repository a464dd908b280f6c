//! Simulated board for driving the complete poll loop on the host.
//!
//! Time advances only through counter reads: the simulated counter is 8 bits
//! wide at 4 ticks per millisecond, so every poll delay crosses the wrap.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use battgate_core::{
    Board, Echo, FreeRunningCounter, Gatekeeper, OpenDrain, Poll, Power, PowerState, Settings,
    WakeHardware,
};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

pub const TICKS_PER_MS: u64 = 4;

#[derive(Debug)]
pub struct World {
    pub button_pressed: bool,
    pub request: bool,
    pub power_pin_high: bool,
    pub echo: Echo,
    pub ticks: u64,
    pub restart_armed: bool,
    pub sleeps: u32,
    pub boots: u32,
}

impl World {
    fn new() -> Self {
        Self {
            button_pressed: false,
            request: false,
            // Floating before the firmware takes the pin
            power_pin_high: false,
            echo: Echo::Released,
            ticks: 0,
            restart_armed: false,
            sleeps: 0,
            boots: 0,
        }
    }
}

type Shared = Rc<RefCell<World>>;

pub struct ButtonPin(Shared);
pub struct RequestPin(Shared);
pub struct SwitchPin(Shared);
pub struct EchoLine(Shared);
pub struct Counter(Shared);
pub struct Wake(Shared);

impl ErrorType for ButtonPin {
    type Error = Infallible;
}

impl InputPin for ButtonPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().button_pressed)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow().button_pressed)
    }
}

impl ErrorType for RequestPin {
    type Error = Infallible;
}

impl InputPin for RequestPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow().request)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().request)
    }
}

impl ErrorType for SwitchPin {
    type Error = Infallible;
}

impl OutputPin for SwitchPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().power_pin_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().power_pin_high = true;
        Ok(())
    }
}

impl OpenDrain for EchoLine {
    fn pull_low(&mut self) {
        self.0.borrow_mut().echo = Echo::DrivenLow;
    }

    fn release(&mut self) {
        self.0.borrow_mut().echo = Echo::Released;
    }
}

impl FreeRunningCounter for Counter {
    const BITS: u32 = 8;
    const TICKS_PER_MS: u32 = TICKS_PER_MS as u32;

    fn ticks(&mut self) -> u32 {
        let mut world = self.0.borrow_mut();
        world.ticks += 1;
        (world.ticks & 0xff) as u32
    }
}

impl WakeHardware<ButtonPin, RequestPin> for Wake {
    fn halt_until_wake(&mut self, button: &mut ButtonPin, request: &mut RequestPin) {
        assert!(
            Rc::ptr_eq(&self.0, &button.0) && Rc::ptr_eq(&self.0, &request.0),
            "woken by lines of another board"
        );
        let mut world = self.0.borrow_mut();
        assert!(world.power_pin_high, "halted with the system powered");
        world.sleeps += 1;
    }

    fn arm_restart(&mut self) {
        self.0.borrow_mut().restart_armed = true;
    }
}

type SimGatekeeper = Gatekeeper<ButtonPin, RequestPin, SwitchPin, EchoLine, Counter, Wake>;

/// A booted gatekeeper on the simulated board. A restart sentinel from the
/// poll loop boots a fresh gatekeeper, as the watchdog reset would.
pub struct Sim {
    pub world: Shared,
    gatekeeper: SimGatekeeper,
}

impl Sim {
    pub fn boot() -> Self {
        let world = Rc::new(RefCell::new(World::new()));
        let gatekeeper = Self::build(&world);
        Self { world, gatekeeper }
    }

    fn build(world: &Shared) -> SimGatekeeper {
        {
            let mut w = world.borrow_mut();
            w.boots += 1;
            w.restart_armed = false;
        }
        let board = Board {
            button: ButtonPin(world.clone()),
            request: RequestPin(world.clone()),
            power_switch: SwitchPin(world.clone()),
            echo: EchoLine(world.clone()),
            counter: Counter(world.clone()),
            wake: Wake(world.clone()),
        };
        Gatekeeper::new(board, Settings::default())
    }

    pub fn poll(&mut self) -> Poll {
        let poll = self.gatekeeper.poll();
        if poll == Poll::Restart {
            assert!(
                self.world.borrow().restart_armed,
                "restarted without arming the watchdog"
            );
            self.gatekeeper = Self::build(&self.world);
        }
        poll
    }

    /// Poll for `ms` milliseconds of simulated poll cycles (10 ms each).
    pub fn run_for_ms(&mut self, ms: u32) {
        for _ in 0..ms / 10 {
            self.poll();
        }
    }

    pub fn press(&mut self) {
        self.world.borrow_mut().button_pressed = true;
    }

    pub fn release(&mut self) {
        self.world.borrow_mut().button_pressed = false;
    }

    pub fn set_request(&mut self, high: bool) {
        self.world.borrow_mut().request = high;
    }

    pub fn state(&self) -> PowerState {
        self.gatekeeper.state()
    }

    /// Power as seen on the switch pin (high cuts).
    pub fn power(&self) -> Power {
        if self.world.borrow().power_pin_high {
            Power::Cut
        } else {
            Power::Supplied
        }
    }

    pub fn echo(&self) -> Echo {
        self.world.borrow().echo
    }

    pub fn sleeps(&self) -> u32 {
        self.world.borrow().sleeps
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.world.borrow().ticks / TICKS_PER_MS
    }

    /// Boot, hold the button until the rail comes on, then let the system
    /// raise its request line.
    pub fn powered_on() -> Self {
        let mut sim = Self::boot();
        sim.press();
        while sim.power() == Power::Cut {
            sim.poll();
        }
        sim.release();
        sim.set_request(true);
        sim.poll();
        assert_eq!(sim.state(), PowerState::On);
        sim
    }
}
