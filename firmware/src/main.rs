#![no_std]
#![no_main]

use battgate_core::{Board, Gatekeeper, Poll};
use cortex_m::peripheral::SCB;
use cortex_m_rt::entry;
use defmt::{info, warn};
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::pac;
use embassy_rp::watchdog::{ResetReason, Watchdog};
use {defmt_rtt as _, panic_probe as _};

mod board;
mod config;
mod config_resources;

use crate::config_resources::{
    AssignedResources, InputResources, OutputResources, WatchdogResources,
};

#[cfg(feature = "rp235xa")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

#[entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    info!("Starting battgate {}", config::FW_VERSION_STR);

    // The restart watchdog armed before the last sleep survives the reset it
    // caused; stop it before it fires in the middle of the poll loop
    pac::WATCHDOG.ctrl().modify(|w| w.set_enable(false));
    let watchdog = Watchdog::new(r.watchdog.watchdog);

    match watchdog.reset_reason() {
        Some(ResetReason::TimedOut) => info!("Restarted after wake-up"),
        Some(ResetReason::Forced) => warn!("Restarted by a forced watchdog reset"),
        None => info!("Power-on reset"),
    }

    let board = Board {
        button: Input::new(r.inputs.button, Pull::Up),
        request: Input::new(r.inputs.request, Pull::None),
        power_switch: Output::new(r.outputs.power_switch, Level::High),
        echo: board::EchoPin::new(Flex::new(r.outputs.echo)),
        counter: board::SystemTimer,
        wake: board::DormantSleep::new(watchdog),
    };
    let mut gatekeeper = Gatekeeper::new(board, config::SETTINGS);

    info!("Gatekeeper initialized: {}", config::SETTINGS);

    loop {
        if gatekeeper.poll() == Poll::Restart {
            // Only reached if the restart watchdog never fired
            warn!("No watchdog reset after wake-up, resetting core");
            SCB::sys_reset();
        }
    }
}
