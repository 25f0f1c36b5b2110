//! Receiver-link and attitude-excursion monitoring.
//!
//! Evaluated first on every tick, before the state machine, so a trigger
//! can never be masked by a simultaneous switch change.

use embassy_time::Instant;

use crate::config::FailsafeThresholds;
use crate::state::{FlightState, TickInputs};

/// Per-tick failsafe verdict. The only internal state is the active latch
/// and the recovery debounce timer.
pub struct FailsafeMonitor {
    thresholds: FailsafeThresholds,
    active: bool,
    recovered_since: Option<Instant>,
}

impl FailsafeMonitor {
    pub fn new(thresholds: FailsafeThresholds) -> Self {
        Self {
            thresholds,
            active: false,
            recovered_since: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Evaluate the monitor for this tick and return `failsafe_active`.
    ///
    /// Trigger is the OR of receiver silence beyond the timeout and, while
    /// auto-levelling, an attitude excursion strictly beyond the configured
    /// limits. Once latched, the flag clears only after link and attitude
    /// have both been healthy for the full debounce window.
    pub fn evaluate(&mut self, now: Instant, state: FlightState, inputs: &TickInputs) -> bool {
        let link_ok = match inputs.last_valid_frame {
            // A stamp from the future (clock skew between collaborators)
            // reads as fresh rather than underflowing the subtraction.
            Some(t) => now <= t || now - t <= self.thresholds.signal_loss_timeout,
            // No frame since boot counts as a lost link.
            None => false,
        };

        // Strict greater-than: a roll of exactly the limit is still valid.
        let attitude_ok = inputs.attitude.roll_cdeg.abs() <= self.thresholds.roll_limit_cdeg
            && inputs.attitude.pitch_cdeg.abs() <= self.thresholds.pitch_limit_cdeg;

        // The excursion check only applies when an auto-level command can
        // be the cause; rate and pass-through fly at whatever angle the
        // pilot commands.
        let triggered = !link_ok || (state == FlightState::AutoLevel && !attitude_ok);

        if triggered {
            #[cfg(feature = "defmt")]
            if !self.active {
                defmt::warn!(
                    "failsafe trigger: link_ok={} attitude_ok={}",
                    link_ok,
                    attitude_ok
                );
            }
            self.active = true;
            self.recovered_since = None;
        } else if self.active {
            // Link is healthy here, or we would have re-triggered above.
            if attitude_ok {
                // `since` was a previous tick's `now`, so the subtraction
                // cannot underflow for a monotonic caller.
                let since = *self.recovered_since.get_or_insert(now);
                if now - since >= self.thresholds.recovery_debounce {
                    #[cfg(feature = "defmt")]
                    defmt::info!("failsafe cleared after debounce");
                    self.active = false;
                    self.recovered_since = None;
                }
            } else {
                // Attitude still out of bounds; restart the debounce.
                self.recovered_since = None;
            }
        }

        self.active
    }
}
