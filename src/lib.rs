//! Flight-mode governance core.
//!
//! The safety-critical arbiter between raw receiver/sensor input and the
//! PID/mixer stage: on every control-loop tick it decides which control
//! law is active (disarmed, pass-through, rate, auto-level, failsafe,
//! calibrating) and which gain bank feeds the attitude controller.
//!
//! The crate is pure `no_std` and does no I/O: the firmware's tick handler
//! samples its inputs (arm switch, mode switch, calibration status,
//! receiver-link freshness, attitude estimate), calls
//! [`FlightGovernor::tick`] with the tick's `Instant`, and executes
//! against the returned state and law selection. Evaluation order within
//! a tick is fixed: failsafe monitor, then state machine, then dispatcher.
//!
//! Everything here is total by construction — an undefined transition in
//! flight-control firmware is itself a safety defect, so invalid inputs
//! decode to the least-authority interpretation instead of an error.

#![no_std]

pub mod config;
pub mod dispatch;
pub mod failsafe;
pub mod gains;
pub mod governor;
pub mod machine;
pub mod rc;
pub mod state;

pub use config::{ConfigError, FailsafeThresholds};
pub use dispatch::{dispatch, ControlLaw, LawSelection};
pub use failsafe::FailsafeMonitor;
pub use gains::{GainBank, GainBankId, GainBankRegistry, GainSet};
pub use governor::{FlightGovernor, StateChange, TickOutput};
pub use machine::FlightStateMachine;
pub use state::{AttitudeSample, CalibrationResult, FlightMode, FlightState, TickInputs};
