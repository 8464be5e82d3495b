//! Feasibility check for proposed branch paths.
//!
//! A proposed path is feasible when some input follows every proposed step
//! and ends with the door open. The search runs over a fixed grid of inputs
//! that lands on both sides of every threshold, so each reachable branch
//! combination has a representative.

use serde::Serialize;

use crate::core::branch::{Answer, BranchStep, ParsedTrace, trace_f1};
use crate::core::evaluator::evaluate_input;
use crate::core::observer::NoopObserver;
use crate::core::types::{Decision, DecisionInput, SensorStatus};

/// Reward for an infeasible path or an `unreachable` answer.
pub const MIN_REWARD: f64 = -1.0;

const MODES: [i32; 3] = [1, 2, 3];
const TEMPERATURES: [i32; 6] = [17, 18, 26, 27, 30, 31];
const USER_LEVELS: [i32; 4] = [4, 5, 9, 10];

/// The input and sensor status that realise a feasible path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Witness {
    pub input: DecisionInput,
    pub sensor: SensorStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceVerdict {
    pub sat: bool,
    /// F1 against the witness trace when `sat`, otherwise [`MIN_REWARD`].
    pub reward: f64,
    pub reason: String,
    pub witness: Option<Witness>,
}

impl TraceVerdict {
    fn unsat(reason: &str) -> Self {
        Self {
            sat: false,
            reward: MIN_REWARD,
            reason: reason.to_string(),
            witness: None,
        }
    }
}

/// Verify a parsed trace, honouring its declared answer.
///
/// The door can always be opened, so an `unreachable` answer is wrong.
pub fn verify_parsed(trace: &ParsedTrace) -> TraceVerdict {
    match trace.answer {
        Answer::Reachable => verify_trace(&trace.steps),
        Answer::Unreachable => TraceVerdict::unsat("answer declared unreachable"),
    }
}

/// Find the first grid input whose run agrees with every proposed step and
/// opens the door, and score the path against that run.
pub fn verify_trace(proposed: &[BranchStep]) -> TraceVerdict {
    match find_witness(proposed) {
        Some((witness, decision)) => TraceVerdict {
            sat: true,
            reward: trace_f1(proposed, &decision.trace),
            reason: "ok".to_string(),
            witness: Some(witness),
        },
        None => TraceVerdict::unsat("unsatisfiable trace"),
    }
}

fn find_witness(proposed: &[BranchStep]) -> Option<(Witness, Decision)> {
    for mode in MODES {
        for temperature in TEMPERATURES {
            for user_level in USER_LEVELS {
                for emergency in [false, true] {
                    for sensor in [SensorStatus::Ok, SensorStatus::Fail] {
                        let input = DecisionInput::new(mode, temperature, user_level, emergency);
                        let decision = evaluate_input(&input, sensor, &mut NoopObserver);
                        if decision.open && follows(proposed, &decision) {
                            return Some((Witness { input, sensor }, decision));
                        }
                    }
                }
            }
        }
    }
    None
}

/// Every proposed condition was tested in this run and went the same way.
fn follows(proposed: &[BranchStep], decision: &Decision) -> bool {
    proposed
        .iter()
        .all(|step| decision.trace.outcome(step.point) == Some(step.taken))
}
