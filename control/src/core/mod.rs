//! Deterministic, pure decision logic.
//!
//! Core modules must be free of I/O side effects. Diagnostics leave through
//! the [`observer::DecisionObserver`] seam; everything else is returned as
//! plain values suitable for tests.

pub mod branch;
pub mod evaluator;
pub mod invariants;
pub mod observer;
pub mod types;
pub mod verify;
