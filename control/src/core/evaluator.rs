//! Staged open/closed decision.
//!
//! Three stages run in a fixed order over one mutable [`DecisionState`]:
//!
//! 1. **Mode selection** picks the rule subset from the raw mode.
//! 2. **Emergency override** replaces the mode result outright when the
//!    emergency flag is set.
//! 3. **Lock enforcement** closes the door if the lock is still set.
//!
//! Each stage overwrites `open`; nothing is combined across stages. Lock
//! enforcement never re-locks, so an authorized emergency that cleared the
//! lock stays open.

use crate::core::branch::{BranchPoint, BranchTrace};
use crate::core::observer::{DecisionEvent, DecisionObserver, NoopObserver};
use crate::core::types::{Decision, DecisionInput, Mode, SensorStatus};

/// Strictly above this temperature, mode 1 opens.
pub const HIGH_TEMPERATURE: i32 = 30;
/// Minimum user level that unlocks mode 2.
pub const UNLOCK_LEVEL: i32 = 5;
/// Minimum user level that opens under emergency.
pub const EMERGENCY_LEVEL: i32 = 10;
/// Inclusive comfort range used by the default mode.
pub const COMFORT_RANGE: std::ops::RangeInclusive<i32> = 18..=26;

/// Mutable per-call state. Discarded when the call returns.
#[derive(Debug, Clone, Copy)]
struct DecisionState {
    open: bool,
    locked: bool,
    sensor_ok: bool,
}

/// Decide whether to open, with a healthy sensor and no diagnostics.
pub fn evaluate(mode: i32, temperature: i32, user_level: i32, emergency: bool) -> bool {
    let input = DecisionInput::new(mode, temperature, user_level, emergency);
    evaluate_input(&input, SensorStatus::Ok, &mut NoopObserver).open
}

/// Run all stages for `input` and return the full decision.
///
/// Never fails: a sensor fault is a policy branch that keeps the door closed
/// and is reported as [`DecisionEvent::SensorFault`].
pub fn evaluate_input(
    input: &DecisionInput,
    sensor: SensorStatus,
    observer: &mut dyn DecisionObserver,
) -> Decision {
    observer.on_event(&DecisionEvent::Started {
        input: *input,
        sensor,
    });

    let mut state = DecisionState {
        open: false,
        locked: false,
        sensor_ok: sensor.is_ok(),
    };
    let mut trace = BranchTrace::default();

    let mode = select_mode(input, &mut state, &mut trace, observer);
    emergency_override(input, &mut state, &mut trace, observer);
    enforce_lock(&mut state, &mut trace, observer);

    observer.on_event(&DecisionEvent::Finished {
        open: state.open,
        locked: state.locked,
    });
    trace.record(BranchPoint::DoorOpen, state.open);

    Decision {
        open: state.open,
        locked: state.locked,
        mode,
        trace,
    }
}

fn select_mode(
    input: &DecisionInput,
    state: &mut DecisionState,
    trace: &mut BranchTrace,
    observer: &mut dyn DecisionObserver,
) -> Mode {
    let mode = Mode::from_raw(input.mode);

    if trace.record(BranchPoint::ModeTemperature, mode == Mode::Temperature) {
        observer.on_event(&DecisionEvent::ModeSelected(mode));
        state.open = trace.record(
            BranchPoint::TemperatureHigh,
            input.temperature > HIGH_TEMPERATURE && state.sensor_ok,
        );
    } else if trace.record(BranchPoint::ModeUserLevel, mode == Mode::UserLevel) {
        observer.on_event(&DecisionEvent::ModeSelected(mode));
        // Fail closed until the user proves enough authority.
        state.locked = true;
        if trace.record(BranchPoint::UserUnlock, input.user_level >= UNLOCK_LEVEL) {
            state.open = true;
            state.locked = false;
        }
    } else {
        observer.on_event(&DecisionEvent::ModeSelected(mode));
        if trace.record(BranchPoint::SensorFault, !state.sensor_ok) {
            observer.on_event(&DecisionEvent::SensorFault);
            state.open = false;
        } else {
            state.open = trace.record(
                BranchPoint::ComfortRange,
                COMFORT_RANGE.contains(&input.temperature),
            );
        }
    }

    mode
}

fn emergency_override(
    input: &DecisionInput,
    state: &mut DecisionState,
    trace: &mut BranchTrace,
    observer: &mut dyn DecisionObserver,
) {
    if !trace.record(BranchPoint::Emergency, input.emergency) {
        return;
    }
    observer.on_event(&DecisionEvent::EmergencyActivated);
    if trace.record(
        BranchPoint::EmergencyAuthorized,
        input.user_level >= EMERGENCY_LEVEL,
    ) {
        state.open = true;
        state.locked = false;
    } else {
        state.open = false;
    }
}

fn enforce_lock(
    state: &mut DecisionState,
    trace: &mut BranchTrace,
    observer: &mut dyn DecisionObserver,
) {
    if trace.record(BranchPoint::Locked, state.locked) {
        observer.on_event(&DecisionEvent::LockEnforced);
        state.open = false;
    }
}
