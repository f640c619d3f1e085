//! Session orchestration.
//!
//! `SessionController` wires the pure core to its effectful collaborators:
//! it validates operands, dispatches through the operation registry, commits
//! successful results to history, and only then publishes to observers, so
//! an observer inspecting history always sees the record it was notified
//! about already included.

mod error;

pub use error::SessionError;

use crate::config::SessionConfig;
use crate::core::{CalculationRecord, HistoryManager, OperationKind, OperationRegistry};
use crate::notify::{CommitObserver, NotificationBus, ObserverFailure};
use crate::persistence::HistoryStore;
use std::path::Path;

/// Where the session currently is in its request cycle.
///
/// Every request starts in `Idle`, moves through `Computing`, and ends in
/// `Idle` again via `Committed`, or stops at `Error` when the computation
/// or operand validation fails (in which case history is untouched and no
/// observer runs).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    Idle,
    Computing,
    Committed,
    Error,
}

/// The result of a successful evaluation: the committed record plus any
/// non-fatal observer failures gathered during publication.
#[derive(Debug)]
pub struct CommitOutcome {
    /// The record now at the top of the visible history
    pub record: CalculationRecord,
    /// Observer failures; the commit stands regardless
    pub observer_failures: Vec<ObserverFailure>,
}

/// One interactive calculation session.
///
/// Owns the registry, the history, the notification bus, and the history
/// store; processes one request at a time to completion. A future
/// multi-session setup would create one controller per session, never
/// sharing these parts.
///
/// # Example
///
/// ```rust
/// use reckoner::core::OperationKind;
/// use reckoner::{SessionConfig, SessionController};
///
/// let mut session = SessionController::new(SessionConfig::default());
/// let outcome = session.evaluate(OperationKind::Add, 10.0, 5.0).unwrap();
/// assert_eq!(outcome.record.result, 15.0);
/// assert_eq!(session.history().len(), 1);
/// ```
pub struct SessionController {
    config: SessionConfig,
    registry: OperationRegistry,
    history: HistoryManager,
    bus: NotificationBus,
    store: HistoryStore,
    next_sequence: u64,
    phase: SessionPhase,
}

impl SessionController {
    /// Create a session with the built-in operation registry.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_registry(config, OperationRegistry::default())
    }

    /// Create a session with a caller-assembled registry.
    ///
    /// Registration is static at startup; the registry cannot be swapped
    /// once the session is running.
    pub fn with_registry(config: SessionConfig, registry: OperationRegistry) -> Self {
        let history = HistoryManager::new(config.max_history_size);
        let store = HistoryStore::new(config.history_file_path());
        Self {
            registry,
            history,
            bus: NotificationBus::new(),
            store,
            next_sequence: 1,
            phase: SessionPhase::Idle,
            config,
        }
    }

    /// Register a commit observer; call order is notification order.
    pub fn subscribe(&mut self, observer: Box<dyn CommitObserver>) {
        self.bus.subscribe(observer);
    }

    /// The session's configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current phase of the request cycle.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Path of the persisted history file.
    pub fn history_path(&self) -> &Path {
        self.store.path()
    }

    /// Compute, commit, and publish one calculation.
    ///
    /// On any failure the visible history is unchanged and no observer is
    /// notified. On success the record is committed first and published
    /// second, and observer failures are returned alongside the record
    /// rather than as errors.
    pub fn evaluate(
        &mut self,
        kind: OperationKind,
        left: f64,
        right: f64,
    ) -> Result<CommitOutcome, SessionError> {
        self.phase = SessionPhase::Computing;
        if let Err(error) = self
            .validate_operand(left)
            .and_then(|()| self.validate_operand(right))
        {
            self.phase = SessionPhase::Error;
            return Err(error);
        }

        let result = match self
            .registry
            .evaluate(kind, left, right, self.config.precision)
        {
            Ok(value) => value,
            Err(error) => {
                self.phase = SessionPhase::Error;
                return Err(error.into());
            }
        };

        let record = CalculationRecord {
            kind,
            left,
            right,
            result,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        self.history.commit(record.clone());
        self.phase = SessionPhase::Committed;
        tracing::info!(sequence = record.sequence, calculation = %record, "committed");

        let observer_failures = self.bus.publish(&record, self.history.snapshot());
        self.phase = SessionPhase::Idle;

        Ok(CommitOutcome {
            record,
            observer_failures,
        })
    }

    fn validate_operand(&self, value: f64) -> Result<(), SessionError> {
        if !value.is_finite() || value.abs() > self.config.max_input_value {
            return Err(SessionError::InvalidOperand {
                value,
                max: self.config.max_input_value,
            });
        }
        Ok(())
    }

    /// Undo the most recent visible calculation.
    ///
    /// Returns the record now on top, or `None` when the history became
    /// empty.
    pub fn undo(&mut self) -> Result<Option<CalculationRecord>, SessionError> {
        Ok(self.history.undo()?)
    }

    /// Restore the most recently undone calculation.
    pub fn redo(&mut self) -> Result<CalculationRecord, SessionError> {
        Ok(self.history.redo()?)
    }

    /// Discard all visible history and undo/redo state.
    ///
    /// The sequence counter keeps advancing: sequence numbers are never
    /// reused within a session.
    pub fn clear(&mut self) {
        self.history.clear();
        tracing::info!("history cleared");
    }

    /// Read-only view of the visible history.
    pub fn history(&self) -> &[CalculationRecord] {
        self.history.snapshot()
    }

    /// Write the current visible history to the configured file.
    ///
    /// Returns the number of records written.
    pub fn save(&self) -> Result<usize, SessionError> {
        let snapshot = self.history.snapshot();
        self.store.save(snapshot)?;
        tracing::info!(records = snapshot.len(), path = %self.store.path().display(), "history saved");
        Ok(snapshot.len())
    }

    /// Replace the in-memory history with the persisted file contents.
    ///
    /// Loading is not undoable: both stacks are cleared, and the sequence
    /// counter advances past the largest loaded sequence so later commits
    /// stay unique and monotonic.
    pub fn load(&mut self) -> Result<usize, SessionError> {
        let records = self.store.load()?;
        let highest = records.iter().map(|r| r.sequence).max().unwrap_or(0);
        self.next_sequence = self.next_sequence.max(highest + 1);
        let count = records.len();
        self.history.replace(records);
        tracing::info!(records = count, path = %self.store.path().display(), "history loaded");
        Ok(count)
    }
}
