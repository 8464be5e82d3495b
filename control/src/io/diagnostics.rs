//! Observers that turn decision events into output.
//!
//! - [`TracingObserver`]: structured `tracing` events, filtered by `RUST_LOG`.
//! - [`DebugTranscript`]: the human-readable debug block printed by
//!   `control eval --debug`. Buffered, so the caller decides where it goes.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::core::observer::{DecisionEvent, DecisionObserver};

/// Forwards decision events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn on_event(&mut self, event: &DecisionEvent) {
        match event {
            DecisionEvent::Started { input, sensor } => debug!(
                mode = input.mode,
                temperature = input.temperature,
                user_level = input.user_level,
                emergency = input.emergency,
                sensor = sensor.as_str(),
                "decision started"
            ),
            DecisionEvent::ModeSelected(mode) => debug!(?mode, "mode selected"),
            DecisionEvent::SensorFault => error!("bad sensor; keeping door closed"),
            DecisionEvent::EmergencyActivated => warn!("emergency mode activated"),
            DecisionEvent::LockEnforced => debug!("system is locked"),
            DecisionEvent::Finished { open, locked } => info!(open, locked, "decision finished"),
        }
    }
}

/// Collects the debug block (stdout) and error lines (stderr) for one or
/// more evaluations.
#[derive(Debug, Clone, Default)]
pub struct DebugTranscript {
    pub stdout: String,
    pub stderr: String,
}

impl DecisionObserver for DebugTranscript {
    fn on_event(&mut self, event: &DecisionEvent) {
        let out = &mut self.stdout;
        match event {
            DecisionEvent::Started { input, sensor } => {
                line(out, "\n=== Control Function Debug ===");
                line(
                    out,
                    format_args!(
                        "Input: mode={}, temp={}, userLevel={}, emergency={}",
                        input.mode,
                        input.temperature,
                        input.user_level,
                        u8::from(input.emergency)
                    ),
                );
                line(out, format_args!("Sensor status: {}", sensor.as_str()));
            }
            DecisionEvent::ModeSelected(mode) => line(out, mode.label()),
            DecisionEvent::SensorFault => line(&mut self.stderr, "[ERROR] Bad sensor"),
            DecisionEvent::EmergencyActivated => line(out, "Emergency mode activated!"),
            DecisionEvent::LockEnforced => line(out, "System is LOCKED"),
            DecisionEvent::Finished { open, locked } => {
                line(
                    out,
                    format_args!(
                        "Final state: open={}, locked={}",
                        u8::from(*open),
                        u8::from(*locked)
                    ),
                );
                line(out, "==============================\n");
                line(
                    out,
                    if *open {
                        "[OK] Door is OPEN"
                    } else {
                        "[INFO] Door remains CLOSED"
                    },
                );
            }
        }
    }
}

/// Append `text` and a newline to `buf`.
fn line(buf: &mut String, text: impl fmt::Display) {
    buf.push_str(&text.to_string());
    buf.push('\n');
}
