//! Sleep and wake sequencing.
//!
//! Waking up is treated the same as a power cycle: after the wake edge the
//! controller arms the watchdog and waits for it to reset the chip, so no
//! code ever resumes from the middle of the poll loop.

use embedded_hal::digital::InputPin;

use crate::clock::{Clock, FreeRunningCounter};
use crate::inputs::InputSampler;

/// Hardware needed to sleep and come back through a reset.
///
/// The wake source is any edge on the button or the request line, so the
/// halt borrows both input pins for as long as it lasts.
pub trait WakeHardware<B, R> {
    /// Drop latched edges, enable wake on any edge of both lines and halt in
    /// the lowest available power mode. Returns once a line changed level.
    fn halt_until_wake(&mut self, button: &mut B, request: &mut R);

    /// Start the watchdog with its shortest timeout.
    fn arm_restart(&mut self);
}

/// Returned when the restart wait elapsed without the watchdog firing. On
/// real hardware this never happens; the caller must reinitialize from
/// scratch.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Restart;

pub struct SleepController<W> {
    hardware: W,
    restart_wait_ms: u32,
}

impl<W> SleepController<W> {
    /// `restart_wait_ms` must exceed the watchdog timeout armed by
    /// [`WakeHardware::arm_restart`].
    pub fn new(hardware: W, restart_wait_ms: u32) -> Self {
        Self {
            hardware,
            restart_wait_ms,
        }
    }

    pub fn sleep<B, R, C>(
        &mut self,
        inputs: &mut InputSampler<B, R>,
        clock: &mut Clock<C>,
    ) -> Restart
    where
        B: InputPin,
        R: InputPin,
        C: FreeRunningCounter,
        W: WakeHardware<B, R>,
    {
        let (button, request) = inputs.lines();
        self.hardware.halt_until_wake(button, request);

        self.hardware.arm_restart();
        clock.delay_ms(self.restart_wait_ms);
        Restart
    }
}
