//! Control logic of the battery gatekeeper.
//!
//! The gatekeeper switches battery power to a downstream system. A long press
//! of the power button switches the rail on; the system then takes over by
//! raising its request line and releases the rail by lowering it again. A
//! longer press forces the rail off. While the system is powered the button
//! state is echoed to it on an open-drain line. With the rail off the
//! controller sleeps until either input changes, then restarts through the
//! watchdog.
//!
//! Everything here is written against [`embedded_hal`] pins and the small
//! traits in [`clock`], [`outputs`] and [`sleep`], so the whole poll loop runs
//! on the host against simulated hardware.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod gatekeeper;
pub mod inputs;
pub mod outputs;
pub mod sleep;
pub mod state_machine;

pub use clock::{Clock, FreeRunningCounter};
pub use config::Thresholds;
pub use gatekeeper::{Board, Gatekeeper, Poll, Settings};
pub use inputs::Sample;
pub use outputs::{Echo, OpenDrain, Outputs, Power};
pub use sleep::WakeHardware;
pub use state_machine::{PowerMachine, PowerState, Step};
