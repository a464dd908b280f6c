//! Power state machine: decides from the sampled inputs when the battery
//! rail is switched and when the controller goes to sleep.
//!
//! The off state covers two phases: "rail off, waiting for the sleep timeout"
//! and "rail switched on by the button, waiting for the system to raise its
//! request line". The machine only treats the session as on once the system
//! itself asserts the request line, so a request line that is still low while
//! the system boots is not read as a shutdown request.
//!
//! Transitioning off holds the rail off for a settle time before sleeping so
//! that the decaying system rail cannot produce spurious wake edges.

use statig::blocking::StateMachine;
use statig::prelude::*;

use crate::config::Thresholds;
use crate::inputs::{PressCounter, Sample};
use crate::outputs::Outputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    Off,
    On,
    TransitioningOff,
}

/// Result of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Continue,
    /// Power is off and settled; the caller must run the sleep sequence.
    Sleep,
}

/// Shared storage of the state machine.
#[derive(Debug)]
pub struct PowerController {
    thresholds: Thresholds,
    // Cycles the button has been held without interruption
    button: PressCounter,
    // Cycles since the current state was entered
    idle: u16,
}

impl PowerController {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            button: PressCounter::default(),
            idle: 0,
        }
    }

    fn tally(&mut self, sample: &Sample) {
        self.button.tally(sample.button_pressed);
        self.idle = self.idle.saturating_add(1);
    }
}

#[state_machine(
    initial = "State::off()",
    before_transition = "Self::before_transition",
    state(derive(Debug))
)]
impl PowerController {
    #[allow(unused_variables)]
    fn before_transition(&mut self, source: &State, target: &State) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Transitioning from {} to {} (button {}, idle {})",
            PowerState::from(source),
            PowerState::from(target),
            self.button.cycles(),
            self.idle
        );
    }

    // All three checks run every cycle, in this order, and the last one
    // naming a target state wins. The power level ends up following the
    // target: entering transitioning off cuts power even if the button check
    // supplied it in the same cycle.
    #[state]
    fn off(&mut self, event: &Sample, context: &mut Outputs) -> Outcome<State> {
        self.tally(event);

        let mut outcome = Handled;
        if self.idle > self.thresholds.auto_off_idle {
            context.cut_power();
            outcome = Transition(State::transitioning_off());
        }
        if self.button.cycles() > self.thresholds.power_on_hold {
            context.supply_power();
            self.idle = 0;
        }
        if event.request {
            context.supply_power();
            outcome = Transition(State::on());
        }
        outcome
    }

    #[state(entry_action = "enter_on")]
    fn on(&mut self, event: &Sample, context: &mut Outputs) -> Outcome<State> {
        self.tally(event);

        if !event.request {
            return Transition(State::transitioning_off());
        }
        if self.button.cycles() > self.thresholds.power_off_hold {
            return Transition(State::transitioning_off());
        }
        context.echo_button(self.button.cycles() > 0);
        Handled
    }

    #[action]
    fn enter_on(&mut self, context: &mut Outputs) {
        self.idle = 0;
        context.supply_power();
        context.echo_button(self.button.cycles() > 0);
    }

    #[state(entry_action = "enter_transitioning_off")]
    fn transitioning_off(&mut self, event: &Sample, context: &mut Outputs) -> Outcome<State> {
        self.tally(event);

        if self.idle > self.thresholds.settle_before_sleep {
            context.request_sleep();
        }
        Handled
    }

    #[action]
    fn enter_transitioning_off(&mut self, context: &mut Outputs) {
        self.idle = 0;
        context.cut_power();
        context.echo_button(false);
    }
}

impl From<&State> for PowerState {
    fn from(state: &State) -> Self {
        match state {
            State::Off { .. } => PowerState::Off,
            State::On { .. } => PowerState::On,
            State::TransitioningOff { .. } => PowerState::TransitioningOff,
        }
    }
}

/// The state machine together with the outputs it commands.
pub struct PowerMachine {
    machine: StateMachine<PowerController>,
    outputs: Outputs,
}

impl PowerMachine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            machine: PowerController::new(thresholds).state_machine(),
            outputs: Outputs::new(),
        }
    }

    /// Run one poll cycle worth of decisions.
    pub fn step(&mut self, sample: Sample) -> Step {
        self.machine.handle_with_context(&sample, &mut self.outputs);

        if self.outputs.take_sleep_request() {
            Step::Sleep
        } else {
            Step::Continue
        }
    }

    pub fn state(&self) -> PowerState {
        PowerState::from(self.machine.state())
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }
}
