//! RP2040 / RP235x implementations of the gatekeeper hardware traits.

use battgate_core::config::RESTART_WATCHDOG_TIMEOUT_MS;
use battgate_core::{FreeRunningCounter, OpenDrain, WakeHardware};
use defmt::debug;
use embassy_rp::clocks;
use embassy_rp::gpio::{DormantWakeConfig, Flex, Input, Pull};
use embassy_rp::pac;
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;

use crate::config::{COUNTER_BITS, COUNTER_TICKS_PER_MS};

/// Low word of the 1 MHz system timer.
pub struct SystemTimer;

impl FreeRunningCounter for SystemTimer {
    const BITS: u32 = COUNTER_BITS;
    const TICKS_PER_MS: u32 = COUNTER_TICKS_PER_MS;

    fn ticks(&mut self) -> u32 {
        #[cfg(feature = "rp2040")]
        let timer = pac::TIMER;
        #[cfg(feature = "rp235xa")]
        let timer = pac::TIMER0;

        timer.timerawl().read()
    }
}

/// Button echo line. The output latch is set low once and never touched
/// again; pulling low enables the output driver, releasing disables it.
pub struct EchoPin<'d> {
    pin: Flex<'d>,
}

impl<'d> EchoPin<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::None);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl OpenDrain for EchoPin<'_> {
    fn pull_low(&mut self) {
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }
}

/// DORMANT sleep with the button and request lines as wake sources, restart
/// through the watchdog.
///
/// DORMANT stops the crystal oscillator and every clock derived from it; only
/// the GPIO edge detectors keep running. The wake configuration is dropped
/// again as soon as the chip is back, and the watchdog reset that follows
/// reinitializes everything else.
pub struct DormantSleep {
    watchdog: Watchdog,
}

impl DormantSleep {
    pub fn new(watchdog: Watchdog) -> Self {
        Self { watchdog }
    }
}

impl<'d> WakeHardware<Input<'d>, Input<'d>> for DormantSleep {
    fn halt_until_wake(&mut self, button: &mut Input<'d>, request: &mut Input<'d>) {
        let any_edge = DormantWakeConfig {
            edge_high: true,
            edge_low: true,
            level_high: false,
            level_low: false,
        };
        let _button_wake = button.dormant_wake(any_edge);
        let _request_wake = request.dormant_wake(any_edge);

        debug!("Entering dormant sleep");
        clocks::dormant_sleep();
    }

    fn arm_restart(&mut self) {
        self.watchdog
            .start(Duration::from_millis(RESTART_WATCHDOG_TIMEOUT_MS as u64));
    }
}
