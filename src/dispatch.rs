//! Maps the settled flight state to a control law and gain bank.
//!
//! Queried once per tick by the control loop, after the state machine has
//! stepped. Pure and total over the finite state set.

use crate::gains::GainBankId;
use crate::state::FlightState;

/// Behaviour tag for the PID/mixer stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLaw {
    /// Zero/minimal actuator authority.
    Neutral,
    /// Pilot sticks forwarded to actuators, no stabilisation.
    PassThrough,
    /// Angular-rate stabilisation only.
    Rate,
    /// Commanded-attitude hold.
    AutoLevel,
}

/// What the control loop executes against this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LawSelection {
    pub law: ControlLaw,
    /// `None` whenever no gain bank applies (neutral and pass-through).
    pub gain_bank: Option<GainBankId>,
}

/// The dispatcher proper: cannot fail and performs no mutation.
pub fn dispatch(state: FlightState) -> LawSelection {
    match state {
        FlightState::Disarmed | FlightState::Failsafe | FlightState::Calibrating => LawSelection {
            law: ControlLaw::Neutral,
            gain_bank: None,
        },
        FlightState::PassThrough => LawSelection {
            law: ControlLaw::PassThrough,
            gain_bank: None,
        },
        FlightState::Rate => LawSelection {
            law: ControlLaw::Rate,
            gain_bank: Some(GainBankId::RateGain),
        },
        FlightState::AutoLevel => LawSelection {
            law: ControlLaw::AutoLevel,
            gain_bank: Some(GainBankId::LevelledGain),
        },
    }
}
