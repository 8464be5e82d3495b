//! CLI tests for `control eval`.
//!
//! Spawns the control binary and checks verdicts, debug output, and exit codes.

use std::process::{Command, Output};

use control::core::types::SensorStatus;
use control::exit_codes;
use control::io::config::{ControlConfig, DEFAULT_CONFIG_FILE, write_config};

fn eval(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_control"))
        .current_dir(dir)
        .arg("eval")
        .args(args)
        .output()
        .expect("control eval")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn eval_prints_verdict_for_documented_scenarios() {
    let temp = tempfile::tempdir().expect("tempdir");
    let scenarios = [
        (["1", "35", "0", "0"], "open"),
        (["1", "20", "0", "0"], "closed"),
        (["2", "0", "7", "0"], "open"),
        (["2", "0", "2", "0"], "closed"),
        (["9", "22", "0", "0"], "open"),
        (["9", "22", "3", "1"], "closed"),
        (["2", "0", "12", "1"], "open"),
    ];
    for (args, expected) in scenarios {
        let output = eval(temp.path(), &args);
        assert_eq!(output.status.code(), Some(exit_codes::OK), "{args:?}");
        assert_eq!(stdout(&output).trim(), expected, "{args:?}");
    }
}

#[test]
fn eval_debug_prints_block_and_branches() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = eval(temp.path(), &["2", "0", "2", "0", "--debug", "--branches"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let out = stdout(&output);
    assert!(out.contains("=== Control Function Debug ==="));
    assert!(out.contains("Mode 2: User level control"));
    assert!(out.contains("System is LOCKED"));
    assert!(out.contains("[INFO] Door remains CLOSED"));
    assert!(out.contains("mode_user_level T\nuser_unlock F"));
}

#[test]
fn eval_json_reports_lock_state() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = eval(temp.path(), &["2", "0", "4", "false", "--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["open"], false);
    assert_eq!(value["locked"], true);
    assert_eq!(value["mode"], "user_level");
    assert_eq!(value["sensor"], "ok");
    assert_eq!(value["input"]["user_level"], 4);
    assert!(value["trace"].as_array().is_some_and(|steps| !steps.is_empty()));
}

#[test]
fn eval_uses_sensor_status_from_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cfg = ControlConfig::default();
    cfg.sensor.status = SensorStatus::Fail;
    write_config(&temp.path().join(DEFAULT_CONFIG_FILE), &cfg).expect("write config");

    let output = eval(temp.path(), &["3", "22", "0", "0", "--debug"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(stdout(&output).trim_end().ends_with("closed"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[ERROR] Bad sensor"));
}

#[test]
fn eval_rejects_bad_arguments_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = eval(temp.path(), &["1", "20", "0", "maybe"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));

    let output = eval(temp.path(), &["1", "20"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}

#[test]
fn eval_reports_unparseable_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "[output\n").expect("write");
    let output = eval(temp.path(), &["1", "35", "0", "0"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("load config"));
}

#[test]
fn eval_json_format_from_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        temp.path().join(DEFAULT_CONFIG_FILE),
        "[output]\nformat = \"json\"\n",
    )
    .expect("write");

    let output = eval(temp.path(), &["1", "35", "0", "0"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["open"], true);
    assert_eq!(value["mode"], "temperature");
}

#[test]
fn eval_debug_from_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "[output]\ndebug = true\n")
        .expect("write");

    let output = eval(temp.path(), &["9", "22", "0", "0"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let out = stdout(&output);
    assert!(out.starts_with("\n=== Control Function Debug ===\n"));
    assert!(out.contains("[OK] Door is OPEN"));
    assert!(out.trim_end().ends_with("open"));
}

#[test]
fn eval_rejects_debug_flag_with_json_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = eval(temp.path(), &["1", "35", "0", "0", "--debug", "--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
}

#[test]
fn eval_rejects_debug_and_json_combined_through_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "[output]\ndebug = true\n")
        .expect("write");

    let output = eval(temp.path(), &["1", "35", "0", "0", "--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("debug output cannot be combined with JSON output")
    );

    std::fs::write(
        temp.path().join(DEFAULT_CONFIG_FILE),
        "[output]\nformat = \"json\"\n",
    )
    .expect("write");
    let output = eval(temp.path(), &["1", "35", "0", "0", "--debug"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
}
