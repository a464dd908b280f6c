//! Power switch and button echo outputs.

use embedded_hal::digital::OutputPin;

/// Commanded state of the battery switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Power {
    /// Switch asserted, system rail disconnected
    Cut,
    /// Switch released, battery connected to the system
    Supplied,
}

/// Commanded state of the button echo line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Echo {
    /// High impedance; the system side pull-up reads "released"
    Released,
    /// Pulled low; the system reads "pressed"
    DrivenLow,
}

/// Output record produced by the state machine. Levels are latched: they
/// hold until a later step changes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    pub power: Power,
    pub echo: Echo,
    sleep_requested: bool,
}

impl Outputs {
    pub const fn new() -> Self {
        Self {
            power: Power::Cut,
            echo: Echo::Released,
            sleep_requested: false,
        }
    }

    pub(crate) fn cut_power(&mut self) {
        self.power = Power::Cut;
    }

    pub(crate) fn supply_power(&mut self) {
        self.power = Power::Supplied;
    }

    pub(crate) fn echo_button(&mut self, pressed: bool) {
        self.echo = if pressed { Echo::DrivenLow } else { Echo::Released };
    }

    pub(crate) fn request_sleep(&mut self) {
        self.sleep_requested = true;
    }

    pub(crate) fn take_sleep_request(&mut self) -> bool {
        core::mem::take(&mut self.sleep_requested)
    }
}

impl Default for Outputs {
    fn default() -> Self {
        Self::new()
    }
}

/// Battery switch output. Active low semantics: the pin is driven high to
/// cut power.
pub struct PowerSwitch<P> {
    pin: P,
}

impl<P: OutputPin> PowerSwitch<P> {
    /// Takes the pin and asserts the cut immediately.
    pub fn new(pin: P) -> Self {
        let mut switch = Self { pin };
        switch.apply(Power::Cut);
        switch
    }

    pub fn apply(&mut self, power: Power) {
        // Nothing sensible to do with a write error; the next cycle retries
        let _ = match power {
            Power::Cut => self.pin.set_high(),
            Power::Supplied => self.pin.set_low(),
        };
    }
}

/// A line that can only be pulled low or left floating.
///
/// The echo line crosses into the system's supply domain, so implementations
/// must never drive it high: the pin's output latch stays low and only the
/// output driver is switched.
pub trait OpenDrain {
    fn pull_low(&mut self);
    fn release(&mut self);
}

/// Mirrors the power button onto the system's button line.
pub struct ButtonEcho<E> {
    line: E,
}

impl<E: OpenDrain> ButtonEcho<E> {
    /// Takes the line and releases it.
    pub fn new(line: E) -> Self {
        let mut echo = Self { line };
        echo.apply(Echo::Released);
        echo
    }

    pub fn apply(&mut self, echo: Echo) {
        match echo {
            Echo::Released => self.line.release(),
            Echo::DrivenLow => self.line.pull_low(),
        }
    }
}
