//! Per-tick orchestration: monitor → state machine → dispatcher.
//!
//! The fixed evaluation order inside [`FlightGovernor::tick`] is the
//! ordering guarantee the rest of the firmware relies on; callers invoke
//! it exactly once per control-loop iteration with a single `Instant`
//! sampled at tick start.

use embassy_time::Instant;
use heapless::Deque;

use crate::config::FailsafeThresholds;
use crate::dispatch::{dispatch, LawSelection};
use crate::failsafe::FailsafeMonitor;
use crate::gains::{GainBank, GainBankId, GainBankRegistry};
use crate::machine::FlightStateMachine;
use crate::state::{FlightState, TickInputs};

/// One recorded state change, kept for the telemetry/CLI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateChange {
    pub at: Instant,
    pub from: FlightState,
    pub to: FlightState,
}

/// Everything the tick handler needs downstream of the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    pub state: FlightState,
    pub selection: LawSelection,
    pub failsafe_active: bool,
}

/// Depth of the transition history ring.
const HISTORY_DEPTH: usize = 8;

/// The governance core. Single writer of the flight state; everything it
/// publishes is read-only to collaborators.
pub struct FlightGovernor {
    failsafe: FailsafeMonitor,
    machine: FlightStateMachine,
    gains: GainBankRegistry,
    history: Deque<StateChange, HISTORY_DEPTH>,
}

impl FlightGovernor {
    pub fn new(thresholds: FailsafeThresholds, gains: GainBankRegistry) -> Self {
        Self {
            failsafe: FailsafeMonitor::new(thresholds),
            machine: FlightStateMachine::new(),
            gains,
            history: Deque::new(),
        }
    }

    /// Run one control-loop tick.
    ///
    /// Order is fixed: failsafe verdict first, then the state transition,
    /// then the law/gain selection for the settled state.
    pub fn tick(&mut self, now: Instant, inputs: &TickInputs) -> TickOutput {
        let prev = self.machine.state();
        let failsafe_active = self.failsafe.evaluate(now, prev, inputs);
        let state = self.machine.step(failsafe_active, inputs);

        if state != prev {
            #[cfg(feature = "defmt")]
            defmt::info!("flight state {} -> {}", prev, state);
            if self.history.is_full() {
                self.history.pop_front();
            }
            // Cannot fail: we just made room.
            let _ = self.history.push_back(StateChange {
                at: now,
                from: prev,
                to: state,
            });
        }

        TickOutput {
            state,
            selection: dispatch(state),
            failsafe_active,
        }
    }

    pub fn state(&self) -> FlightState {
        self.machine.state()
    }

    pub fn failsafe_active(&self) -> bool {
        self.failsafe.is_active()
    }

    /// Gain bank lookup for the PID stage.
    pub fn bank(&self, id: GainBankId) -> &GainBank {
        self.gains.bank(id)
    }

    /// Recent state changes, oldest first.
    pub fn recent_transitions(&self) -> impl Iterator<Item = &StateChange> {
        self.history.iter()
    }
}

impl Default for FlightGovernor {
    fn default() -> Self {
        Self::new(FailsafeThresholds::default(), GainBankRegistry::default())
    }
}
