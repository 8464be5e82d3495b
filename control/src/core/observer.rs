//! Observer seam for decision diagnostics.
//!
//! The evaluator reports what it is doing through [`DecisionObserver`] rather
//! than printing. Core code only ever talks to the trait; the side-effecting
//! implementations live in `io::diagnostics`.

use crate::core::types::{DecisionInput, Mode, SensorStatus};

/// Diagnostic events emitted during one evaluation, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionEvent {
    Started {
        input: DecisionInput,
        sensor: SensorStatus,
    },
    ModeSelected(Mode),
    /// Default mode found the sensor unhealthy and kept the door closed.
    SensorFault,
    EmergencyActivated,
    /// Lock enforcement forced the door closed.
    LockEnforced,
    Finished {
        open: bool,
        locked: bool,
    },
}

pub trait DecisionObserver {
    fn on_event(&mut self, event: &DecisionEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {
    fn on_event(&mut self, _event: &DecisionEvent) {}
}

/// Fan an event out to several observers in order.
pub struct Fanout<'a> {
    observers: Vec<&'a mut dyn DecisionObserver>,
}

impl<'a> Fanout<'a> {
    pub fn new(observers: Vec<&'a mut dyn DecisionObserver>) -> Self {
        Self { observers }
    }
}

impl DecisionObserver for Fanout<'_> {
    fn on_event(&mut self, event: &DecisionEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}
