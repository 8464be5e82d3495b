//! I/O helpers for control commands.

pub mod cases;
pub mod config;
pub mod diagnostics;
