// Interval between two state machine steps
pub const POLL_INTERVAL_MS: u32 = 10; // ms

// Hold the button this long while off to switch the battery rail on
pub const POWER_ON_HOLD_MS: u32 = 1_000; // ms

// Hold the button this long while on to force the battery rail off
pub const POWER_OFF_HOLD_MS: u32 = 4_000; // ms

// Time spent in the off state (from boot, or from the last button power-on)
// before giving up and going to sleep. Covers the case where the button
// switched the rail on but the system never raised its request line.
pub const AUTO_OFF_IDLE_MS: u32 = 10_000; // ms

// Time to let the system rail decay after power is cut before arming the
// wake sources
pub const SETTLE_BEFORE_SLEEP_MS: u32 = 3_000; // ms

// Watchdog timeout used to restart the controller after waking up
pub const RESTART_WATCHDOG_TIMEOUT_MS: u32 = 16; // ms

/// Thresholds of the power state machine, counted in poll cycles.
///
/// All comparisons against these values are strict: a threshold of 100 fires
/// on the 101st cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    pub power_on_hold: u16,
    pub power_off_hold: u16,
    pub auto_off_idle: u16,
    pub settle_before_sleep: u16,
}

impl Thresholds {
    /// Thresholds for a poll loop that completes `cycles_per_second` steps per
    /// second. Targets with measurable loop overhead pass a calibrated value
    /// instead of `1000 / POLL_INTERVAL_MS`.
    pub const fn from_cycles_per_second(cycles_per_second: u16) -> Self {
        Self {
            power_on_hold: cycles(POWER_ON_HOLD_MS, cycles_per_second),
            power_off_hold: cycles(POWER_OFF_HOLD_MS, cycles_per_second),
            auto_off_idle: cycles(AUTO_OFF_IDLE_MS, cycles_per_second),
            settle_before_sleep: cycles(SETTLE_BEFORE_SLEEP_MS, cycles_per_second),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from_cycles_per_second((1_000 / POLL_INTERVAL_MS) as u16)
    }
}

const fn cycles(duration_ms: u32, cycles_per_second: u16) -> u16 {
    let count = duration_ms as u64 * cycles_per_second as u64 / 1_000;
    if count > u16::MAX as u64 {
        u16::MAX
    } else {
        count as u16
    }
}
