//! CLI tests for `control check`.
//!
//! Runs the control binary against case files and verifies exit codes match
//! expected values for passing, failing, and invalid case files.

use std::path::Path;
use std::process::Command;

use control::exit_codes;
use control::test_support::{case_toml, write_fixture};

const SCENARIOS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/scenarios.toml");

fn check(dir: &Path, cases: &Path) -> std::process::Output {
    check_with(dir, cases, &[])
}

fn check_with(dir: &Path, cases: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_control"))
        .current_dir(dir)
        .arg("check")
        .arg(cases)
        .args(args)
        .output()
        .expect("control check")
}

#[test]
fn check_documented_scenarios_pass() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = check(temp.path(), Path::new(SCENARIOS));
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains(
        "check: pass case=mode1-hot expected=open actual=open trace_f1=1.00 verdict=sat reward=1.00"
    ));
    assert!(out.contains(
        "case=mode2-locked expected=closed actual=closed trace_f1=0.67 verdict=unsat (unsatisfiable trace)"
    ));
    assert!(out.contains("check: passed=7 failed=0"));
}

#[test]
fn check_failing_case_exits_with_check_failed() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut contents = case_toml("hot", (1, 35, 0, false), true);
    contents.push_str(&case_toml("wrong", (1, 20, 0, false), true));
    let cases = write_fixture(temp.path(), "cases.toml", &contents);

    let output = check(temp.path(), &cases);
    assert_eq!(output.status.code(), Some(exit_codes::CHECK_FAILED));
    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains("check: FAIL case=wrong expected=open actual=closed"));
    assert!(out.contains("check: passed=1 failed=1"));
}

#[test]
fn check_with_failed_sensor_config_closes_temperature_cases() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(temp.path(), "control.toml", "[sensor]\nstatus = \"fail\"\n");
    let cases = write_fixture(
        temp.path(),
        "cases.toml",
        &case_toml("hot", (1, 35, 0, false), false),
    );

    let output = check(temp.path(), &cases);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn check_invalid_case_file_exits_with_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cases = write_fixture(temp.path(), "cases.toml", "[[case]]\nid = \"x\"\n");

    let output = check(temp.path(), &cases);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("load cases"));
}

#[test]
fn check_json_reports_trace_scores() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = check_with(temp.path(), Path::new(SCENARIOS), &["--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let results = report["results"].as_array().expect("results");
    assert_eq!(results.len(), 7);
    assert_eq!(results[0]["id"], "mode1-hot");
    assert_eq!(results[0]["trace_f1"], 1.0);
    assert_eq!(results[0]["trace_verdict"]["sat"], true);
    assert_eq!(results[0]["trace_verdict"]["witness"]["input"]["temperature"], 31);
    assert_eq!(results[1]["trace_f1"], serde_json::Value::Null);
    assert_eq!(results[3]["trace_verdict"]["sat"], false);
    assert_eq!(results[3]["trace_verdict"]["reward"], -1.0);
}

#[test]
fn check_json_format_from_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(temp.path(), "control.toml", "[output]\nformat = \"json\"\n");

    let output = check(temp.path(), Path::new(SCENARIOS));
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["results"][0]["trace_f1"], 1.0);
}

#[test]
fn check_reports_unreachable_answer_as_unsat() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut contents = case_toml("locked", (2, 0, 2, false), false);
    contents.push_str("trace = \"answer: unreachable\"\n");
    let cases = write_fixture(temp.path(), "cases.toml", &contents);

    let output = check(temp.path(), &cases);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains("trace_f1=0.00 verdict=unsat (answer declared unreachable)"));
}
