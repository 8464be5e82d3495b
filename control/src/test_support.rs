//! Test-only helpers for driving the evaluator.

use std::path::{Path, PathBuf};

use crate::core::observer::{DecisionEvent, DecisionObserver};

/// Observer that keeps every event it sees, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<DecisionEvent>,
}

impl DecisionObserver for RecordingObserver {
    fn on_event(&mut self, event: &DecisionEvent) {
        self.events.push(*event);
    }
}

/// Render a single `[[case]]` table for a case file.
pub fn case_toml(id: &str, input: (i32, i32, i32, bool), expect_open: bool) -> String {
    let (mode, temperature, user_level, emergency) = input;
    format!(
        "[[case]]\nid = \"{id}\"\nmode = {mode}\ntemperature = {temperature}\n\
         user_level = {user_level}\nemergency = {emergency}\nexpect_open = {expect_open}\n\n"
    )
}

/// Write `contents` to `name` under `dir` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
