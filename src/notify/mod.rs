//! Commit notifications.
//!
//! After every commit the session publishes the new record to an ordered
//! list of observers. Delivery is synchronous and isolated: a failing
//! observer never blocks the ones after it and never rolls back the commit,
//! which is already visible in history by the time observers run.

mod observers;

pub use observers::{AutoSaveObserver, LoggingObserver};

use crate::core::CalculationRecord;
use thiserror::Error;

/// Error type observers may return; boxed because side effects are arbitrary.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// A non-fatal observer failure, surfaced to the front end for reporting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Observer '{observer}' failed: {reason}")]
pub struct ObserverFailure {
    /// Name of the observer that failed
    pub observer: String,
    /// Rendered failure reason
    pub reason: String,
}

/// A subscriber notified once per commit.
///
/// Observers receive the committed record and a read-only snapshot of the
/// visible history, which already includes that record.
pub trait CommitObserver {
    /// Identity used when reporting failures.
    fn name(&self) -> &str;

    /// React to a committed calculation.
    fn on_committed(
        &mut self,
        record: &CalculationRecord,
        history: &[CalculationRecord],
    ) -> Result<(), ObserverError>;
}

/// Ordered list of commit observers.
///
/// Observers are invoked in registration order (first subscribed, first
/// notified). `publish` collects failures instead of propagating them.
#[derive(Default)]
pub struct NotificationBus {
    observers: Vec<Box<dyn CommitObserver>>,
}

impl NotificationBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer at the end of the call order.
    pub fn subscribe(&mut self, observer: Box<dyn CommitObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver a committed record to every observer, in order.
    ///
    /// Each observer call is isolated: an error is captured as an
    /// [`ObserverFailure`] and delivery continues with the next observer.
    pub fn publish(
        &mut self,
        record: &CalculationRecord,
        history: &[CalculationRecord],
    ) -> Vec<ObserverFailure> {
        let mut failures = Vec::new();
        for observer in &mut self.observers {
            if let Err(error) = observer.on_committed(record, history) {
                let failure = ObserverFailure {
                    observer: observer.name().to_string(),
                    reason: error.to_string(),
                };
                tracing::warn!(observer = %failure.observer, reason = %failure.reason, "observer failed");
                failures.push(failure);
            }
        }
        failures
    }
}
