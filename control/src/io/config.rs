//! CLI configuration stored in `control.toml`.
//!
//! Only the outer surface is configurable: which sensor status to inject and
//! how results are printed. Decision thresholds are fixed in the core.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::types::SensorStatus;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "control.toml";

/// Control CLI configuration (TOML). Missing fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControlConfig {
    pub sensor: SensorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SensorConfig {
    /// Sensor status injected into every evaluation (`"ok"` or `"fail"`).
    pub status: SensorStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print the debug block for every `eval`, as if `--debug` were passed.
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ControlConfig::default()`.
pub fn load_config(path: &Path) -> Result<ControlConfig> {
    if !path.exists() {
        return Ok(ControlConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ControlConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Write config to disk as pretty TOML with a trailing newline.
pub fn write_config(path: &Path, cfg: &ControlConfig) -> Result<()> {
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
