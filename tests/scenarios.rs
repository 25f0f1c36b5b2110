//! End-to-end scenarios driven through the governor, tick by tick, the way
//! the firmware's fast loop would.

use embassy_time::Instant;
use flight_governor::{
    CalibrationResult, ControlLaw, FlightGovernor, FlightMode, FlightState, GainBankId,
    TickInputs,
};

const TICK_MS: u64 = 1; // 1 kHz loop

struct Rig {
    gov: FlightGovernor,
    now_ms: u64,
    inputs: TickInputs,
}

impl Rig {
    /// Fresh governor with a healthy link and a completed calibration.
    fn flyable() -> Self {
        let mut rig = Self {
            gov: FlightGovernor::default(),
            now_ms: 0,
            inputs: TickInputs {
                calibration: Some(CalibrationResult::Success),
                ..TickInputs::default()
            },
        };
        // Short run-up with fresh frames so the link is established before
        // any scenario begins.
        for _ in 0..400 {
            rig.step_with_frame();
        }
        rig
    }

    /// Advance one tick, receiver frame arriving this tick.
    fn step_with_frame(&mut self) -> FlightState {
        self.inputs.last_valid_frame = Some(Instant::from_millis(self.now_ms));
        let out = self.gov.tick(Instant::from_millis(self.now_ms), &self.inputs);
        self.now_ms += TICK_MS;
        out.state
    }

    /// Advance one tick with no new receiver frame.
    fn step_silent(&mut self) -> FlightState {
        let out = self.gov.tick(Instant::from_millis(self.now_ms), &self.inputs);
        self.now_ms += TICK_MS;
        out.state
    }
}

#[test]
fn boots_disarmed_and_stays_there() {
    let mut rig = Rig::flyable();
    assert_eq!(rig.gov.state(), FlightState::Disarmed);
    for _ in 0..100 {
        assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
    }
}

#[test]
fn arm_request_before_calibration_is_ignored_not_queued() {
    let mut rig = Rig::flyable();
    rig.inputs.calibration = Some(CalibrationResult::InProgress);
    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::Rate);
    for _ in 0..50 {
        assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
    }
    // Completing calibration later does not retroactively arm: the switch
    // is still on, so the next tick arms — but only because the input is
    // still present, not because the request was queued. Drop the switch
    // first and verify nothing happens.
    rig.inputs.arm_switch = false;
    rig.inputs.calibration = Some(CalibrationResult::Success);
    assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
    assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
}

#[test]
fn arming_and_mode_changes_follow_the_switches() {
    let mut rig = Rig::flyable();
    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::PassThrough);
    assert_eq!(rig.step_with_frame(), FlightState::PassThrough);

    rig.inputs.mode_switch = Some(FlightMode::Rate);
    assert_eq!(rig.step_with_frame(), FlightState::Rate);

    rig.inputs.mode_switch = Some(FlightMode::AutoLevel);
    assert_eq!(rig.step_with_frame(), FlightState::AutoLevel);

    // Glitched mode channel: hold the current armed state.
    rig.inputs.mode_switch = None;
    assert_eq!(rig.step_with_frame(), FlightState::AutoLevel);

    rig.inputs.arm_switch = false;
    assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
}

#[test]
fn calibration_cycles_are_idempotent() {
    let mut rig = Rig::flyable();
    for _ in 0..3 {
        rig.inputs.calibration_requested = true;
        rig.inputs.calibration = Some(CalibrationResult::InProgress);
        assert_eq!(rig.step_with_frame(), FlightState::Calibrating);
        rig.inputs.calibration_requested = false;
        for _ in 0..20 {
            assert_eq!(rig.step_with_frame(), FlightState::Calibrating);
        }
        rig.inputs.calibration = Some(CalibrationResult::Success);
        assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
        assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
    }
}

#[test]
fn failed_calibration_returns_to_disarmed_and_blocks_arming() {
    let mut rig = Rig::flyable();
    rig.inputs.calibration_requested = true;
    rig.inputs.calibration = Some(CalibrationResult::InProgress);
    assert_eq!(rig.step_with_frame(), FlightState::Calibrating);
    rig.inputs.calibration_requested = false;
    rig.inputs.calibration = Some(CalibrationResult::Failure);
    assert_eq!(rig.step_with_frame(), FlightState::Disarmed);

    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::Rate);
    assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
}

#[test]
fn signal_loss_in_rate_mode_enters_failsafe_next_tick() {
    let mut rig = Rig::flyable();
    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::Rate);
    assert_eq!(rig.step_with_frame(), FlightState::Rate);

    // Frames stop. Default timeout is 500 ms at a 1 ms tick.
    let mut entered_at = None;
    for tick in 0..600u64 {
        let state = rig.step_silent();
        if state == FlightState::Failsafe {
            entered_at = Some(tick);
            break;
        }
    }
    // The tick on which the 500 ms timeout is first exceeded, no later.
    assert_eq!(entered_at, Some(500));
}

#[test]
fn arm_cycling_while_disconnected_stays_in_failsafe() {
    let mut rig = Rig::flyable();
    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::Rate);
    assert_eq!(rig.step_with_frame(), FlightState::Rate);

    for _ in 0..600 {
        rig.step_silent();
    }
    assert_eq!(rig.gov.state(), FlightState::Failsafe);

    // Pilot cycles the arm switch off and on again; still no link.
    rig.inputs.arm_switch = false;
    for _ in 0..50 {
        assert_eq!(rig.step_silent(), FlightState::Failsafe);
    }
    rig.inputs.arm_switch = true;
    for _ in 0..50 {
        assert_eq!(rig.step_silent(), FlightState::Failsafe);
    }
}

#[test]
fn failsafe_recovery_requires_debounce_then_disarm() {
    let mut rig = Rig::flyable();
    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::Rate);
    assert_eq!(rig.step_with_frame(), FlightState::Rate);

    for _ in 0..600 {
        rig.step_silent();
    }
    assert_eq!(rig.gov.state(), FlightState::Failsafe);

    // Link comes back, switch still on: failsafe holds even after the
    // 200 ms debounce clears the monitor.
    for _ in 0..300 {
        assert_eq!(rig.step_with_frame(), FlightState::Failsafe);
    }
    assert!(!rig.gov.failsafe_active());

    // Switch off: back to Disarmed; on again: normal re-arm into Rate.
    rig.inputs.arm_switch = false;
    assert_eq!(rig.step_with_frame(), FlightState::Disarmed);
    rig.inputs.arm_switch = true;
    assert_eq!(rig.step_with_frame(), FlightState::Rate);
}

#[test]
fn auto_level_excursion_beyond_limit_trips_failsafe() {
    let mut rig = Rig::flyable();
    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::AutoLevel);
    assert_eq!(rig.step_with_frame(), FlightState::AutoLevel);

    // Exactly at the 45.00 deg limit: still flying.
    rig.inputs.attitude.roll_cdeg = 4500;
    assert_eq!(rig.step_with_frame(), FlightState::AutoLevel);

    // One hundredth of a degree beyond: failsafe on the next tick.
    rig.inputs.attitude.roll_cdeg = 4501;
    assert_eq!(rig.step_with_frame(), FlightState::Failsafe);
}

#[test]
fn law_and_gain_selection_track_state() {
    let mut rig = Rig::flyable();
    let out = rig.gov.tick(Instant::from_millis(rig.now_ms), &rig.inputs);
    assert_eq!(out.selection.law, ControlLaw::Neutral);
    assert_eq!(out.selection.gain_bank, None);

    rig.inputs.arm_switch = true;
    rig.inputs.mode_switch = Some(FlightMode::Rate);
    rig.step_with_frame();
    rig.inputs.last_valid_frame = Some(Instant::from_millis(rig.now_ms));
    let out = rig.gov.tick(Instant::from_millis(rig.now_ms), &rig.inputs);
    assert_eq!(out.state, FlightState::Rate);
    assert_eq!(out.selection.law, ControlLaw::Rate);
    assert_eq!(out.selection.gain_bank, Some(GainBankId::RateGain));

    // The selected bank resolves in the registry.
    let bank = rig.gov.bank(out.selection.gain_bank.unwrap());
    assert!(bank.roll.kp > 0.0);
}
