//! Failsafe thresholds and their fixed-point conversion.

use embassy_time::Duration;
use thiserror::Error;

// ── Shipped defaults ──────────────────────────────────────────────────────────

/// Roll angle (degrees) beyond which an auto-level command is considered
/// unrecoverable.
pub const FAILSAFE_ROLL_ANGLE: f32 = 45.0;
/// Pitch angle (degrees). Configured independently of roll.
pub const FAILSAFE_PITCH_ANGLE: f32 = 45.0;
/// Receiver silence longer than this trips failsafe.
pub const SIGNAL_LOSS_TIMEOUT: Duration = Duration::from_millis(500);
/// Link and attitude must stay healthy this long before failsafe clears.
pub const RECOVERY_DEBOUNCE: Duration = Duration::from_millis(200);

/// Degrees to hundredths of a degree, truncating toward zero.
///
/// The cast (not rounding) is load-bearing: thresholds must match the
/// attitude samples bit-for-bit, so 45.009° becomes 4500, not 4501.
pub fn degrees_to_cdeg(deg: f32) -> i32 {
    (deg * 100.0) as i32
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("{axis} failsafe angle must be finite and in (0, 180] degrees")]
    InvalidAngleLimit { axis: &'static str },

    #[error("signal-loss timeout must be non-zero")]
    ZeroSignalLossTimeout,

    #[error("recovery debounce window must be non-zero")]
    ZeroRecoveryDebounce,
}

// ── Thresholds ────────────────────────────────────────────────────────────────

/// Immutable failsafe configuration, validated at init time. Angle limits
/// are stored in hundredths of a degree so the per-tick comparisons are
/// pure integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FailsafeThresholds {
    pub roll_limit_cdeg: i32,
    pub pitch_limit_cdeg: i32,
    pub signal_loss_timeout: Duration,
    pub recovery_debounce: Duration,
}

impl FailsafeThresholds {
    /// Build thresholds from floating-point degree limits.
    ///
    /// Roll and pitch are independent values; the conversion truncates
    /// toward zero.
    pub fn from_degrees(
        roll_deg: f32,
        pitch_deg: f32,
        signal_loss_timeout: Duration,
        recovery_debounce: Duration,
    ) -> Result<Self, ConfigError> {
        if !roll_deg.is_finite() || roll_deg <= 0.0 || roll_deg > 180.0 {
            return Err(ConfigError::InvalidAngleLimit { axis: "roll" });
        }
        if !pitch_deg.is_finite() || pitch_deg <= 0.0 || pitch_deg > 180.0 {
            return Err(ConfigError::InvalidAngleLimit { axis: "pitch" });
        }
        if signal_loss_timeout.as_ticks() == 0 {
            return Err(ConfigError::ZeroSignalLossTimeout);
        }
        if recovery_debounce.as_ticks() == 0 {
            return Err(ConfigError::ZeroRecoveryDebounce);
        }

        Ok(Self {
            roll_limit_cdeg: degrees_to_cdeg(roll_deg),
            pitch_limit_cdeg: degrees_to_cdeg(pitch_deg),
            signal_loss_timeout,
            recovery_debounce,
        })
    }
}

impl Default for FailsafeThresholds {
    fn default() -> Self {
        // Shipped constants are known-valid.
        Self {
            roll_limit_cdeg: degrees_to_cdeg(FAILSAFE_ROLL_ANGLE),
            pitch_limit_cdeg: degrees_to_cdeg(FAILSAFE_PITCH_ANGLE),
            signal_loss_timeout: SIGNAL_LOSS_TIMEOUT,
            recovery_debounce: RECOVERY_DEBOUNCE,
        }
    }
}
