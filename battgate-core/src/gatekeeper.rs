use embedded_hal::digital::{InputPin, OutputPin};

use crate::clock::{Clock, FreeRunningCounter};
use crate::config::{POLL_INTERVAL_MS, RESTART_WATCHDOG_TIMEOUT_MS, Thresholds};
use crate::inputs::InputSampler;
use crate::outputs::{ButtonEcho, OpenDrain, Outputs, PowerSwitch};
use crate::sleep::{Restart, SleepController, WakeHardware};
use crate::state_machine::{PowerMachine, PowerState, Step};

/// Everything the gatekeeper touches on the target.
pub struct Board<B, R, P, E, C, W> {
    /// Power button, low when pressed
    pub button: B,
    /// System request line, high when the system wants power
    pub request: R,
    /// Battery switch, high cuts power
    pub power_switch: P,
    /// Button echo towards the system, open drain
    pub echo: E,
    pub counter: C,
    pub wake: W,
}

/// Compiled-in timing for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub thresholds: Thresholds,
    pub poll_interval_ms: u32,
    /// Time to wait for the watchdog reset after waking up
    pub restart_wait_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            poll_interval_ms: POLL_INTERVAL_MS,
            restart_wait_ms: RESTART_WATCHDOG_TIMEOUT_MS + 4,
        }
    }
}

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    Continue,
    /// The controller slept and woke up. Everything must be initialized
    /// again from scratch.
    Restart,
}

/// The poll loop: sample, step, drive, delay.
pub struct Gatekeeper<B, R, P, E, C, W> {
    inputs: InputSampler<B, R>,
    power: PowerSwitch<P>,
    echo: ButtonEcho<E>,
    clock: Clock<C>,
    sleep: SleepController<W>,
    machine: PowerMachine,
    poll_interval_ms: u32,
}

impl<B, R, P, E, C, W> Gatekeeper<B, R, P, E, C, W>
where
    B: InputPin,
    R: InputPin,
    P: OutputPin,
    E: OpenDrain,
    C: FreeRunningCounter,
    W: WakeHardware<B, R>,
{
    /// Takes over the board with power cut and the echo line released.
    pub fn new(board: Board<B, R, P, E, C, W>, settings: Settings) -> Self {
        Self {
            inputs: InputSampler::new(board.button, board.request),
            power: PowerSwitch::new(board.power_switch),
            echo: ButtonEcho::new(board.echo),
            clock: Clock::new(board.counter),
            sleep: SleepController::new(board.wake, settings.restart_wait_ms),
            machine: PowerMachine::new(settings.thresholds),
            poll_interval_ms: settings.poll_interval_ms,
        }
    }

    pub fn poll(&mut self) -> Poll {
        let sample = self.inputs.sample();
        let step = self.machine.step(sample);

        let outputs = *self.machine.outputs();
        self.power.apply(outputs.power);
        self.echo.apply(outputs.echo);

        match step {
            Step::Continue => {
                self.clock.delay_ms(self.poll_interval_ms);
                Poll::Continue
            }
            Step::Sleep => {
                let Restart = self.sleep.sleep(&mut self.inputs, &mut self.clock);
                Poll::Restart
            }
        }
    }

    pub fn state(&self) -> PowerState {
        self.machine.state()
    }

    pub fn outputs(&self) -> &Outputs {
        self.machine.outputs()
    }
}
