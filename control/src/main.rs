//! Access/actuation decision CLI.
//!
//! `control eval` decides a single case from the command line; `control check`
//! runs a TOML case file and reports which expectations hold.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use control::check::{CheckReport, check_file};
use control::core::branch::{BranchTrace, render_trace};
use control::core::evaluator::evaluate_input;
use control::core::observer::{DecisionObserver, Fanout};
use control::core::types::{DecisionInput, Mode, SensorStatus};
use control::exit_codes;
use control::io::config::{ControlConfig, DEFAULT_CONFIG_FILE, OutputFormat, load_config};
use control::io::diagnostics::{DebugTranscript, TracingObserver};
use control::logging;

#[derive(Parser)]
#[command(name = "control", version, about = "Access/actuation decision evaluator")]
struct Cli {
    /// Config file (defaults to `control.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether to open for one set of inputs.
    #[command(allow_negative_numbers = true)]
    Eval {
        /// Operating mode (1 = temperature, 2 = user level, other = normal).
        mode: i32,
        /// Temperature reading.
        temperature: i32,
        /// User authorization level.
        user_level: i32,
        /// Emergency flag (`0`/`1` or `false`/`true`).
        #[arg(action = ArgAction::Set, value_parser = parse_emergency)]
        emergency: bool,
        /// Print the debug block (stdout) and sensor errors (stderr).
        #[arg(long, conflicts_with = "json")]
        debug: bool,
        /// Print the branch trace after the verdict.
        #[arg(long)]
        branches: bool,
        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check every case in a TOML case file.
    Check {
        /// Path to the case file.
        cases: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct EvalOutput<'a> {
    input: &'a DecisionInput,
    sensor: SensorStatus,
    mode: Mode,
    open: bool,
    locked: bool,
    trace: &'a BranchTrace,
}

fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                exit_codes::INVALID
            } else {
                exit_codes::OK
            };
            std::process::exit(code);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let cfg = load_config(&config_path).context("load config")?;

    match cli.command {
        Command::Eval {
            mode,
            temperature,
            user_level,
            emergency,
            debug,
            branches,
            json,
        } => {
            let input = DecisionInput::new(mode, temperature, user_level, emergency);
            let flags = EvalFlags {
                debug: debug || cfg.output.debug,
                branches,
                json: json || cfg.output.format == OutputFormat::Json,
            };
            if flags.debug && flags.json {
                bail!(
                    "debug output cannot be combined with JSON output (check output.debug and output.format in {})",
                    config_path.display()
                );
            }
            cmd_eval(&cfg, &input, flags)
        }
        Command::Check { cases, json } => {
            cmd_check(&cfg, &cases, json || cfg.output.format == OutputFormat::Json)
        }
    }
}

struct EvalFlags {
    debug: bool,
    branches: bool,
    json: bool,
}

fn cmd_eval(cfg: &ControlConfig, input: &DecisionInput, flags: EvalFlags) -> Result<i32> {
    let sensor = cfg.sensor.status;
    let mut tracing_observer = TracingObserver;
    let mut transcript = DebugTranscript::default();
    let decision = {
        let mut fanout = Fanout::new(vec![
            &mut tracing_observer as &mut dyn DecisionObserver,
            &mut transcript as &mut dyn DecisionObserver,
        ]);
        evaluate_input(input, sensor, &mut fanout)
    };

    if flags.debug {
        print!("{}", transcript.stdout);
        eprint!("{}", transcript.stderr);
    }

    if flags.json {
        let output = EvalOutput {
            input,
            sensor,
            mode: decision.mode,
            open: decision.open,
            locked: decision.locked,
            trace: &decision.trace,
        };
        let payload = serde_json::to_string_pretty(&output).context("serialize decision")?;
        println!("{}", payload);
        return Ok(exit_codes::OK);
    }

    println!("{}", verdict(decision.open));
    if flags.branches {
        println!("{}", render_trace(&decision.trace));
    }
    Ok(exit_codes::OK)
}

fn cmd_check(cfg: &ControlConfig, cases: &Path, json: bool) -> Result<i32> {
    let report = check_file(cases, cfg.sensor.status, &mut TracingObserver)?;

    if json {
        let payload = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{}", payload);
    } else {
        print_report(&report);
    }

    if report.all_passed() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::CHECK_FAILED)
    }
}

fn print_report(report: &CheckReport) {
    for result in &report.results {
        let status = if result.passed() { "pass" } else { "FAIL" };
        let mut line = format!(
            "check: {} case={} expected={} actual={}",
            status,
            result.id,
            verdict(result.expected_open),
            verdict(result.open)
        );
        if let Some(f1) = result.trace_f1 {
            line.push_str(&format!(" trace_f1={:.2}", f1));
        }
        if let Some(trace_verdict) = &result.trace_verdict {
            if trace_verdict.sat {
                line.push_str(&format!(" verdict=sat reward={:.2}", trace_verdict.reward));
            } else {
                line.push_str(&format!(" verdict=unsat ({})", trace_verdict.reason));
            }
        }
        println!("{}", line);
        for violation in &result.violations {
            println!("check:   violation: {}", violation);
        }
    }
    println!("check: passed={} failed={}", report.passed(), report.failed());
}

fn verdict(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}

/// Accept `0`/`1` as well as `true`/`false`.
fn parse_emergency(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("expected 0, 1, true or false, got '{other}'")),
    }
}
