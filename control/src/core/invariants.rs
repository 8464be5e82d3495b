//! Post-conditions every decision must satisfy.

use crate::core::evaluator::{COMFORT_RANGE, EMERGENCY_LEVEL, HIGH_TEMPERATURE, UNLOCK_LEVEL};
use crate::core::types::{Decision, DecisionInput, Mode, SensorStatus};

/// Check a decision against the rules it must obey:
/// - never `open` while `locked`
/// - emergency: open iff `user_level >= 10`
/// - otherwise the mode rule alone decides; a failed sensor keeps the
///   temperature and default modes closed
///
/// Returns one message per violation; empty means the decision is sound.
pub fn check_decision(
    input: &DecisionInput,
    sensor: SensorStatus,
    decision: &Decision,
) -> Vec<String> {
    let mut errors = Vec::new();

    if decision.open && decision.locked {
        errors.push("decision is open while locked".to_string());
    }

    if decision.mode != Mode::from_raw(input.mode) {
        errors.push(format!(
            "mode {:?} does not match raw mode {}",
            decision.mode, input.mode
        ));
    }

    let (expected, rule) = expected_open(input, sensor);
    if decision.open != expected {
        errors.push(format!(
            "{rule}: expected open={expected}, got open={}",
            decision.open
        ));
    }

    errors
}

fn expected_open(input: &DecisionInput, sensor: SensorStatus) -> (bool, &'static str) {
    if input.emergency {
        return (input.user_level >= EMERGENCY_LEVEL, "emergency override");
    }
    let sensor_ok = sensor.is_ok();
    match Mode::from_raw(input.mode) {
        Mode::Temperature => (
            sensor_ok && input.temperature > HIGH_TEMPERATURE,
            "temperature mode",
        ),
        Mode::UserLevel => (input.user_level >= UNLOCK_LEVEL, "user level mode"),
        Mode::Normal => (
            sensor_ok && COMFORT_RANGE.contains(&input.temperature),
            "normal mode",
        ),
    }
}
