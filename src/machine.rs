//! The flight state machine.
//!
//! One exhaustive-match transition function, evaluated once per tick after
//! the failsafe monitor. Adding a `FlightState` variant forces every arm
//! of the match (and the dispatcher mapping) to be revisited.

use crate::state::{CalibrationResult, FlightState, TickInputs};

/// Owns the single `FlightState` value for the lifetime of the process.
pub struct FlightStateMachine {
    state: FlightState,
}

impl FlightStateMachine {
    pub fn new() -> Self {
        Self {
            state: FlightState::Disarmed,
        }
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Advance one tick. `failsafe_active` must come from the monitor
    /// evaluated on the same tick.
    pub fn step(&mut self, failsafe_active: bool, inputs: &TickInputs) -> FlightState {
        self.state = next_state(self.state, failsafe_active, inputs);
        self.state
    }
}

impl Default for FlightStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Total transition function: every (state, input) pair has exactly one
/// defined successor.
///
/// Tie-breaks, strictest first:
/// 1. failsafe pre-empts every armed state, before any switch handling;
/// 2. disarm (arm switch off) beats a simultaneous mode change;
/// 3. while disarmed, a calibration request beats an arm request — the
///    least-authority interpretation wins;
/// 4. calibration is unreachable while armed, under any input combination.
pub fn next_state(
    current: FlightState,
    failsafe_active: bool,
    inputs: &TickInputs,
) -> FlightState {
    if failsafe_active && current.is_armed() {
        return FlightState::Failsafe;
    }

    match current {
        FlightState::Disarmed => {
            if inputs.calibration_requested {
                FlightState::Calibrating
            } else if inputs.arm_switch
                && !failsafe_active
                && inputs.calibration == Some(CalibrationResult::Success)
            {
                // Arming needs a readable mode switch; without one there is
                // no defined armed sub-state to enter.
                match inputs.mode_switch {
                    Some(mode) => mode.into(),
                    None => FlightState::Disarmed,
                }
            } else {
                FlightState::Disarmed
            }
        }

        FlightState::Calibrating => match inputs.calibration {
            Some(CalibrationResult::Success) | Some(CalibrationResult::Failure) => {
                FlightState::Disarmed
            }
            Some(CalibrationResult::InProgress) | None => FlightState::Calibrating,
        },

        FlightState::PassThrough | FlightState::Rate | FlightState::AutoLevel => {
            if !inputs.arm_switch {
                FlightState::Disarmed
            } else {
                match inputs.mode_switch {
                    Some(mode) => mode.into(),
                    // Invalid mode value: retain the current armed state.
                    None => current,
                }
            }
        }

        FlightState::Failsafe => {
            // Exit only once the monitor is quiet and the pilot has cycled
            // the arm switch to off. Re-arming then goes through Disarmed.
            if !failsafe_active && !inputs.arm_switch {
                FlightState::Disarmed
            } else {
                FlightState::Failsafe
            }
        }
    }
}
