//! The two named gain banks feeding the attitude controller.
//!
//! Pure data: lookup only. Which bank is active is always derived from the
//! current [`FlightState`](crate::state::FlightState) by the dispatcher,
//! never stored here, so the selection cannot drift out of sync with the
//! state machine.

/// Identifies one of the two gain banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GainBankId {
    RateGain,
    LevelledGain,
}

/// One axis worth of controller gains.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainSet {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    pub integral_limit: f32,
    pub output_limit: f32,
}

impl GainSet {
    pub const fn new(kp: f32, ki: f32, kd: f32, integral_limit: f32, output_limit: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_limit,
            output_limit,
        }
    }
}

/// A complete parameter set for the three control axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainBank {
    pub roll: GainSet,
    pub pitch: GainSet,
    pub yaw: GainSet,
}

/// Holds exactly the `rate_gain` and `levelled_gain` banks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainBankRegistry {
    rate: GainBank,
    levelled: GainBank,
}

impl GainBankRegistry {
    pub const fn new(rate: GainBank, levelled: GainBank) -> Self {
        Self { rate, levelled }
    }

    pub fn bank(&self, id: GainBankId) -> &GainBank {
        match id {
            GainBankId::RateGain => &self.rate,
            GainBankId::LevelledGain => &self.levelled,
        }
    }
}

impl Default for GainBankRegistry {
    fn default() -> Self {
        // Rate loops run hotter on P/D; the levelled bank leans on P/I to
        // hold an absolute angle without derivative kick.
        let rate = GainBank {
            roll: GainSet::new(4.0, 0.8, 0.08, 0.4, 1.0),
            pitch: GainSet::new(4.5, 0.9, 0.09, 0.4, 1.0),
            yaw: GainSet::new(5.0, 1.0, 0.0, 0.4, 1.0),
        };
        let levelled = GainBank {
            roll: GainSet::new(6.0, 1.2, 0.04, 0.3, 1.0),
            pitch: GainSet::new(6.5, 1.3, 0.04, 0.3, 1.0),
            yaw: GainSet::new(5.0, 1.0, 0.0, 0.4, 1.0),
        };
        Self::new(rate, levelled)
    }
}
