//! Decoding of raw CRSF channel values into governance inputs.
//!
//! The receiver task hands us 11-bit channel values (172..=1811 for a
//! normal stick/switch throw). Anything outside that range is treated per
//! the failure policy: the arm switch falls back to "disarm", the mode
//! switch to "no change".

use crate::state::FlightMode;

/// Lowest channel value a CRSF receiver emits at full deflection.
pub const CRSF_CH_MIN: u16 = 172;
/// Highest channel value.
pub const CRSF_CH_MAX: u16 = 1811;

/// Arm switch threshold: high position of a two-position switch.
const ARM_THRESHOLD: u16 = 1200;

/// Three-position mode switch band edges.
const MODE_LOW_MAX: u16 = 700;
const MODE_MID_MAX: u16 = 1400;

/// Decode the arm switch channel. Out-of-range values read as "off".
pub fn arm_switch_from_channel(ch_value: u16) -> bool {
    if !(CRSF_CH_MIN..=CRSF_CH_MAX).contains(&ch_value) {
        return false;
    }
    ch_value > ARM_THRESHOLD
}

/// Decode the three-position mode switch channel. Out-of-range values
/// yield `None`, which the state machine treats as "retain current mode".
pub fn mode_switch_from_channel(ch_value: u16) -> Option<FlightMode> {
    if !(CRSF_CH_MIN..=CRSF_CH_MAX).contains(&ch_value) {
        return None;
    }
    Some(if ch_value <= MODE_LOW_MAX {
        FlightMode::PassThrough
    } else if ch_value <= MODE_MID_MAX {
        FlightMode::Rate
    } else {
        FlightMode::AutoLevel
    })
}
