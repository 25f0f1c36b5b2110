//! Core data types exchanged with the surrounding firmware each tick.
//!
//! All types are `Copy`: the tick handler samples them once and hands them
//! to the governor by value, the same way it treats sensor and RC samples.

use embassy_time::Instant;

// ── Flight state ──────────────────────────────────────────────────────────────

/// The single mutable value of the governance core. `Disarmed` is the
/// power-up state; every other state is reached through the transition
/// function, once per control-loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlightState {
    Disarmed,
    PassThrough,
    Rate,
    AutoLevel,
    Failsafe,
    Calibrating,
}

impl FlightState {
    /// True for the three states in which the pilot has actuator authority.
    pub fn is_armed(self) -> bool {
        matches!(self, Self::PassThrough | Self::Rate | Self::AutoLevel)
    }

    /// Short mode text for the CRSF FLIGHT_MODE telemetry frame.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disarmed => "DISARM",
            Self::PassThrough => "MANU",
            Self::Rate => "RATE",
            Self::AutoLevel => "LEVL",
            Self::Failsafe => "FS!",
            Self::Calibrating => "CAL",
        }
    }
}

impl Default for FlightState {
    fn default() -> Self {
        Self::Disarmed
    }
}

// ── Switch and calibration inputs ─────────────────────────────────────────────

/// Decoded three-position mode switch. Selects the armed sub-state; has no
/// effect while disarmed, calibrating or in failsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlightMode {
    PassThrough,
    Rate,
    AutoLevel,
}

impl From<FlightMode> for FlightState {
    fn from(mode: FlightMode) -> Self {
        match mode {
            FlightMode::PassThrough => Self::PassThrough,
            FlightMode::Rate => Self::Rate,
            FlightMode::AutoLevel => Self::AutoLevel,
        }
    }
}

/// Latest word from the sensor-calibration collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationResult {
    InProgress,
    Success,
    Failure,
}

// ── Sensor/receiver samples ───────────────────────────────────────────────────

/// Attitude estimate in hundredths of a degree (fixed point, truncated).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttitudeSample {
    pub roll_cdeg: i32,
    pub pitch_cdeg: i32,
}

impl AttitudeSample {
    /// Convert a floating-point estimate (degrees) to fixed point.
    /// Truncates toward zero, matching the threshold conversion.
    pub fn from_degrees(roll_deg: f32, pitch_deg: f32) -> Self {
        Self {
            roll_cdeg: (roll_deg * 100.0) as i32,
            pitch_cdeg: (pitch_deg * 100.0) as i32,
        }
    }
}

/// Everything the governor consumes on one tick. Owned and produced by the
/// receiver/sensor collaborators; read-only to this core.
#[derive(Debug, Clone, Copy)]
pub struct TickInputs {
    /// Decoded arm switch. An undecodable channel value must be mapped to
    /// `false` by the caller (see [`crate::rc`]): fail toward disarm.
    pub arm_switch: bool,
    /// Decoded mode switch; `None` means invalid/out-of-range and is
    /// treated as "no change".
    pub mode_switch: Option<FlightMode>,
    /// Operator request to run sensor calibration (honoured only while
    /// disarmed).
    pub calibration_requested: bool,
    /// Last reported calibration result; `None` until a calibration has
    /// been attempted since boot. Arming requires `Some(Success)`.
    pub calibration: Option<CalibrationResult>,
    /// Current attitude estimate.
    pub attitude: AttitudeSample,
    /// Timestamp of the last valid receiver frame; `None` if no frame has
    /// ever been received.
    pub last_valid_frame: Option<Instant>,
}

impl Default for TickInputs {
    fn default() -> Self {
        Self {
            arm_switch: false,
            mode_switch: None,
            calibration_requested: false,
            calibration: None,
            attitude: AttitudeSample::default(),
            last_valid_frame: None,
        }
    }
}
