use battgate_core::Settings;
use battgate_core::Thresholds;
use battgate_core::config::{POLL_INTERVAL_MS, RESTART_WATCHDOG_TIMEOUT_MS};

pub const FW_VERSION_STR: &str = "1.0.0";

// Free-running counter: the 1 MHz system timer, low word
pub const COUNTER_BITS: u32 = 32;
pub const COUNTER_TICKS_PER_MS: u32 = 1_000;

// Poll steps per second. The loop body takes a few microseconds, so no
// calibration against the poll interval is needed.
pub const CYCLES_PER_SECOND: u16 = (1_000 / POLL_INTERVAL_MS) as u16;

// Time to block after arming the restart watchdog. Must exceed the watchdog
// timeout by a margin.
#[cfg(feature = "rp2040")]
pub const RESTART_WAIT_MS: u32 = RESTART_WATCHDOG_TIMEOUT_MS + 4; // ms
#[cfg(feature = "rp235xa")]
pub const RESTART_WAIT_MS: u32 = RESTART_WATCHDOG_TIMEOUT_MS + 14; // ms

pub const SETTINGS: Settings = Settings {
    thresholds: Thresholds::from_cycles_per_second(CYCLES_PER_SECOND),
    poll_interval_ms: POLL_INTERVAL_MS,
    restart_wait_ms: RESTART_WAIT_MS,
};
