//! Case checking for `control check`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::core::branch::trace_f1;
use crate::core::evaluator::evaluate_input;
use crate::core::invariants::check_decision;
use crate::core::observer::DecisionObserver;
use crate::core::types::{DecisionInput, SensorStatus};
use crate::core::verify::{TraceVerdict, verify_parsed};
use crate::io::cases::{Case, CaseFile};

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    pub id: String,
    pub input: DecisionInput,
    pub expected_open: bool,
    pub open: bool,
    pub locked: bool,
    /// F1 of the case's proposed trace against the actual one, if proposed.
    pub trace_f1: Option<f64>,
    /// Whether some input follows the proposed trace and opens, if proposed.
    pub trace_verdict: Option<TraceVerdict>,
    /// Invariant violations of the actual decision.
    pub violations: Vec<String>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.open == self.expected_open && self.violations.is_empty()
    }
}

/// Results for a whole case file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    pub results: Vec<CaseResult>,
}

impl CheckReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|result| result.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Evaluate every case in `file` with the given sensor status.
pub fn check_cases(
    file: &CaseFile,
    sensor: SensorStatus,
    observer: &mut dyn DecisionObserver,
) -> Result<CheckReport> {
    let mut report = CheckReport::default();
    for case in &file.cases {
        let result = check_case(case, sensor, observer)?;
        debug!(case_id = %result.id, passed = result.passed(), "case checked");
        report.results.push(result);
    }
    Ok(report)
}

fn check_case(
    case: &Case,
    sensor: SensorStatus,
    observer: &mut dyn DecisionObserver,
) -> Result<CaseResult> {
    let input = case.input();
    let decision = evaluate_input(&input, sensor, observer);
    let proposed = case.proposed_trace()?;
    let trace_f1 = proposed
        .as_ref()
        .map(|parsed| trace_f1(&parsed.steps, &decision.trace));
    let trace_verdict = proposed.as_ref().map(verify_parsed);
    Ok(CaseResult {
        id: case.id.clone(),
        input,
        expected_open: case.expect_open,
        open: decision.open,
        locked: decision.locked,
        trace_f1,
        trace_verdict,
        violations: check_decision(&input, sensor, &decision),
    })
}

/// Load a case file from disk and check it.
pub fn check_file(
    path: &Path,
    sensor: SensorStatus,
    observer: &mut dyn DecisionObserver,
) -> Result<CheckReport> {
    let file = CaseFile::load(path)?;
    check_cases(&file, sensor, observer).with_context(|| format!("check {}", path.display()))
}
