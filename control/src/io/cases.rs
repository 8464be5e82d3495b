//! Case file parsing and validation.
//!
//! A case file is TOML with one `[[case]]` table per expected decision:
//!
//! ```toml
//! [[case]]
//! id = "mode1-hot"
//! mode = 1
//! temperature = 35
//! user_level = 0
//! emergency = false
//! expect_open = true
//! trace = "mode_temperature T\ntemperature_high T"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::core::branch::{ParsedTrace, parse_trace};
use crate::core::types::DecisionInput;

/// A parsed case file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseFile {
    #[serde(rename = "case", default)]
    pub cases: Vec<Case>,
}

/// One expected decision.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Case {
    /// Unique identifier (slug format: `[a-z0-9_-]+`).
    pub id: String,
    pub mode: i32,
    pub temperature: i32,
    pub user_level: i32,
    #[serde(default)]
    pub emergency: bool,
    pub expect_open: bool,
    /// Optional proposed branch path, `<branch> <T|F>` per line, optionally
    /// headed by `answer: reachable|unreachable`.
    pub trace: Option<String>,
}

impl Case {
    pub fn input(&self) -> DecisionInput {
        DecisionInput::new(self.mode, self.temperature, self.user_level, self.emergency)
    }

    /// Parsed proposed trace, if the case carries one.
    pub fn proposed_trace(&self) -> Result<Option<ParsedTrace>> {
        self.trace
            .as_deref()
            .map(parse_trace)
            .transpose()
            .with_context(|| format!("case {} trace", self.id))
    }
}

impl CaseFile {
    /// Load and validate a case file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read cases {}", path.display()))?;
        Self::parse_str(&contents).with_context(|| format!("load cases {}", path.display()))
    }

    pub fn parse_str(contents: &str) -> Result<Self> {
        let file: CaseFile = toml::from_str(contents).context("parse cases")?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        if self.cases.is_empty() {
            bail!("case must be a non-empty array");
        }
        let mut seen = HashSet::new();
        for (index, case) in self.cases.iter().enumerate() {
            validate_case_id(&case.id).with_context(|| format!("case[{}] invalid", index))?;
            if !seen.insert(case.id.as_str()) {
                bail!("duplicate case id '{}'", case.id);
            }
            case.proposed_trace()?;
        }
        Ok(())
    }
}

fn validate_case_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("id must be non-empty");
    }
    if !id
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("id must match [a-z0-9_-]+: {}", id);
    }
    Ok(())
}
