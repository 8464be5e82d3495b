//! Stable exit codes for control CLI commands.

/// Command succeeded (`eval` always exits with this on valid input).
pub const OK: i32 = 0;
/// Invalid arguments, config, or case file.
pub const INVALID: i32 = 1;
/// `control check` found at least one failing case.
pub const CHECK_FAILED: i32 = 2;
