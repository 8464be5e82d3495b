//! Access/actuation decision evaluator.
//!
//! Decides whether a door (or valve) opens from an operating mode, a
//! temperature reading, a user authorization level and an emergency flag.
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (staged evaluation, branch traces,
//!   invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config and case files, diagnostic
//!   output).
//!
//! [`check`] coordinates core logic with I/O to implement `control check`.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::evaluator::{evaluate, evaluate_input};
pub use crate::core::types::{Decision, DecisionInput, Mode, SensorStatus};
