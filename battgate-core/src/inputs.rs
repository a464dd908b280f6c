//! Sampling of the button and request lines.

use embedded_hal::digital::InputPin;

/// Input levels read at the start of a poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub button_pressed: bool,
    pub request: bool,
}

impl Sample {
    pub const fn new(button_pressed: bool, request: bool) -> Self {
        Self {
            button_pressed,
            request,
        }
    }
}

/// Reads the power button (active low, pulled up) and the system request
/// line (active high, pulled down externally).
pub struct InputSampler<B, R> {
    button: B,
    request: R,
}

impl<B: InputPin, R: InputPin> InputSampler<B, R> {
    pub fn new(button: B, request: R) -> Self {
        Self { button, request }
    }

    /// Read both lines. A failed read counts as the idle level: button
    /// released, request low.
    pub fn sample(&mut self) -> Sample {
        Sample {
            button_pressed: self.button.is_low().unwrap_or(false),
            request: self.request.is_high().unwrap_or(false),
        }
    }

    pub(crate) fn lines(&mut self) -> (&mut B, &mut R) {
        (&mut self.button, &mut self.request)
    }
}

/// Continuous-press counter fed one sample per poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressCounter(u16);

impl PressCounter {
    pub fn tally(&mut self, pressed: bool) {
        self.0 = if pressed { self.0.saturating_add(1) } else { 0 };
    }

    pub fn cycles(&self) -> u16 {
        self.0
    }
}
