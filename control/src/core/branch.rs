//! Branch traces: which conditions an evaluation checked, and how they went.
//!
//! A trace lists every condition the evaluator actually tested, in execution
//! order. Conditions on branches that were never reached are absent, which is
//! what makes traces comparable against a proposed path.

use std::fmt;
use std::sync::LazyLock;

use anyhow::{Result, anyhow, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

static TRACE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```trace\s*(.*?)```").expect("valid trace block regex"));

/// A condition tested by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPoint {
    /// `mode == 1`
    ModeTemperature,
    /// `temperature > 30 && sensor_ok`
    TemperatureHigh,
    /// `mode == 2`
    ModeUserLevel,
    /// `user_level >= 5`
    UserUnlock,
    /// `!sensor_ok` in the default mode
    SensorFault,
    /// `18 <= temperature <= 26`
    ComfortRange,
    /// `emergency`
    Emergency,
    /// `user_level >= 10` under emergency
    EmergencyAuthorized,
    /// `locked` at lock enforcement
    Locked,
    /// final `open`
    DoorOpen,
}

impl BranchPoint {
    pub const ALL: [BranchPoint; 10] = [
        BranchPoint::ModeTemperature,
        BranchPoint::TemperatureHigh,
        BranchPoint::ModeUserLevel,
        BranchPoint::UserUnlock,
        BranchPoint::SensorFault,
        BranchPoint::ComfortRange,
        BranchPoint::Emergency,
        BranchPoint::EmergencyAuthorized,
        BranchPoint::Locked,
        BranchPoint::DoorOpen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BranchPoint::ModeTemperature => "mode_temperature",
            BranchPoint::TemperatureHigh => "temperature_high",
            BranchPoint::ModeUserLevel => "mode_user_level",
            BranchPoint::UserUnlock => "user_unlock",
            BranchPoint::SensorFault => "sensor_fault",
            BranchPoint::ComfortRange => "comfort_range",
            BranchPoint::Emergency => "emergency",
            BranchPoint::EmergencyAuthorized => "emergency_authorized",
            BranchPoint::Locked => "locked",
            BranchPoint::DoorOpen => "door_open",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|point| point.name() == name)
    }
}

impl fmt::Display for BranchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tested condition and whether it held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStep {
    pub point: BranchPoint,
    pub taken: bool,
}

impl fmt::Display for BranchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.point, if self.taken { "T" } else { "F" })
    }
}

/// Ordered record of the conditions tested during one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchTrace {
    steps: Vec<BranchStep>,
}

impl BranchTrace {
    /// Record `point` with outcome `taken` and hand `taken` back, so the call
    /// can sit directly inside an `if`.
    pub fn record(&mut self, point: BranchPoint, taken: bool) -> bool {
        self.steps.push(BranchStep { point, taken });
        taken
    }

    pub fn decisions(&self) -> &[BranchStep] {
        &self.steps
    }

    /// Outcome of `point`, or `None` when it was never tested.
    pub fn outcome(&self, point: BranchPoint) -> Option<bool> {
        self.steps
            .iter()
            .find(|step| step.point == point)
            .map(|step| step.taken)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Render a trace as `<branch> <T|F>` lines, one per tested condition.
pub fn render_trace(trace: &BranchTrace) -> String {
    trace
        .decisions()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Declared answer of a proposed trace: can the door end up open?
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    #[default]
    Reachable,
    Unreachable,
}

/// A proposed trace: the declared answer plus the branch path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTrace {
    pub answer: Answer,
    pub steps: Vec<BranchStep>,
}

/// Parse `<branch> <T|F>` lines into a proposed trace.
///
/// The lines may be given bare or wrapped in a fenced `trace` block; in the
/// latter case only the first block is read. Blank lines are ignored. The
/// first line may be an `answer: reachable|unreachable` header; without one
/// the answer is `reachable`.
pub fn parse_trace(text: &str) -> Result<ParsedTrace> {
    let body = match TRACE_BLOCK_RE.captures(text) {
        Some(captures) => captures.get(1).map_or("", |m| m.as_str()),
        None => text,
    };

    let mut lines = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let mut parsed = ParsedTrace::default();
    if let Some(header) = lines.peek()
        && let Some((key, value)) = header.split_once(':')
        && key.trim().eq_ignore_ascii_case("answer")
    {
        parsed.answer = match value.trim().to_ascii_lowercase().as_str() {
            "reachable" => Answer::Reachable,
            "unreachable" => Answer::Unreachable,
            other => bail!("invalid answer token: {other}"),
        };
        lines.next();
    }

    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [name, direction] = parts.as_slice() else {
            bail!("invalid trace line: {line}");
        };
        let point =
            BranchPoint::from_name(name).ok_or_else(|| anyhow!("unknown branch: {name}"))?;
        let taken = match direction.to_ascii_uppercase().as_str() {
            "T" => true,
            "F" => false,
            other => bail!("branch direction must be T or F: {other}"),
        };
        parsed.steps.push(BranchStep { point, taken });
    }
    Ok(parsed)
}

/// F1 score of a proposed path against the conditions actually tested.
///
/// A proposed step counts as a match when its condition was tested and went
/// the same way. Precision is over the proposed steps, recall over the actual
/// ones.
pub fn trace_f1(proposed: &[BranchStep], actual: &BranchTrace) -> f64 {
    let matches = proposed
        .iter()
        .filter(|step| actual.outcome(step.point) == Some(step.taken))
        .count() as f64;

    let precision = if proposed.is_empty() {
        0.0
    } else {
        matches / proposed.len() as f64
    };
    let recall = if actual.is_empty() {
        0.0
    } else {
        matches / actual.len() as f64
    };

    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}
