//! Shared deterministic types for the decision core.
//!
//! These types define the stable contract between the evaluator, its
//! observers and the outer CLI. They hold no external state and are plain
//! values, so they can be freely copied across threads.

use serde::{Deserialize, Serialize};

use crate::core::branch::BranchTrace;

/// Rule subset that governs the primary (stage A) decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Raw mode `1`: open when it is hot enough.
    Temperature,
    /// Raw mode `2`: open for sufficiently authorized users, locked otherwise.
    UserLevel,
    /// Any other raw mode ("mode 3"): open inside the comfort range.
    Normal,
}

impl Mode {
    /// Map a raw mode selector onto a rule subset. Total over `i32`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Mode::Temperature,
            2 => Mode::UserLevel,
            _ => Mode::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Temperature => "Mode 1: Temperature-based control",
            Mode::UserLevel => "Mode 2: User level control",
            Mode::Normal => "Mode 3 (default): Normal operation",
        }
    }
}

/// Health of the (future) temperature sensor, injected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    #[default]
    Ok,
    Fail,
}

impl SensorStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, SensorStatus::Ok)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SensorStatus::Ok => "OK",
            SensorStatus::Fail => "FAIL",
        }
    }
}

/// The four caller-supplied inputs of a single decision.
///
/// No domain restriction is enforced: every combination is a valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionInput {
    pub mode: i32,
    pub temperature: i32,
    pub user_level: i32,
    pub emergency: bool,
}

impl DecisionInput {
    pub fn new(mode: i32, temperature: i32, user_level: i32, emergency: bool) -> Self {
        Self {
            mode,
            temperature,
            user_level,
            emergency,
        }
    }
}

/// Outcome of one evaluation.
///
/// `locked` is the lock flag as it stood after lock enforcement; it is
/// exposed so callers can assert the lock invariant (`locked` implies
/// `!open`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub open: bool,
    pub locked: bool,
    pub mode: Mode,
    pub trace: BranchTrace,
}
