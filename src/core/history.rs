//! Bounded, reversible calculation history.
//!
//! `HistoryManager` is the sole owner of the visible history and the redo
//! stack. Undo and redo move whole records between the two; nothing is ever
//! deep-copied and no record lives in both at once.

use super::error::HistoryError;
use super::record::CalculationRecord;

/// Undo/redo history over immutable calculation records.
///
/// The visible history is bounded to `max_size` entries; once the bound is
/// exceeded the oldest entry is evicted first. Eviction is independent of
/// undo/redo: undone records sit on the redo stack and are not counted
/// against the bound.
///
/// A fresh commit always clears the redo stack, giving the standard linear
/// undo/redo law: `undo` then `redo` restores the exact prior state as long
/// as no new commit intervened.
///
/// # Example
///
/// ```rust
/// use reckoner::core::{CalculationRecord, HistoryManager, OperationKind};
///
/// let mut history = HistoryManager::new(100);
/// history.commit(CalculationRecord {
///     kind: OperationKind::Add,
///     left: 10.0,
///     right: 5.0,
///     result: 15.0,
///     sequence: 1,
/// });
/// history.commit(CalculationRecord {
///     kind: OperationKind::Multiply,
///     left: 3.0,
///     right: 4.0,
///     result: 12.0,
///     sequence: 2,
/// });
///
/// let new_top = history.undo().unwrap();
/// assert_eq!(new_top.unwrap().sequence, 1);
/// assert_eq!(history.snapshot().len(), 1);
///
/// let restored = history.redo().unwrap();
/// assert_eq!(restored.sequence, 2);
/// assert_eq!(history.snapshot().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct HistoryManager {
    visible: Vec<CalculationRecord>,
    redo: Vec<CalculationRecord>,
    max_size: usize,
}

impl HistoryManager {
    /// Create an empty history bounded to `max_size` visible entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            visible: Vec::new(),
            redo: Vec::new(),
            max_size,
        }
    }

    /// Append a freshly committed record.
    ///
    /// Clears the redo stack (any new forward action invalidates redo
    /// history), then evicts the oldest visible entry if the bound is
    /// exceeded. Never fails.
    pub fn commit(&mut self, record: CalculationRecord) {
        self.visible.push(record);
        self.redo.clear();
        while self.visible.len() > self.max_size {
            self.visible.remove(0);
        }
    }

    /// Move the newest visible record onto the redo stack.
    ///
    /// Returns the new top of the visible history, or `None` when the undo
    /// emptied it. Fails with [`HistoryError::Empty`] when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Result<Option<CalculationRecord>, HistoryError> {
        let record = self.visible.pop().ok_or(HistoryError::Empty)?;
        self.redo.push(record);
        Ok(self.visible.last().cloned())
    }

    /// Move the most recently undone record back into the visible history.
    ///
    /// Subject to the same bound as `commit`, except that the restored
    /// record itself must survive: with a zero-sized bound the redo is
    /// rejected with [`HistoryError::Full`] instead of silently discarding
    /// it. Fails with [`HistoryError::Empty`] when nothing was undone.
    pub fn redo(&mut self) -> Result<CalculationRecord, HistoryError> {
        if self.redo.is_empty() {
            return Err(HistoryError::Empty);
        }
        if self.max_size == 0 {
            return Err(HistoryError::Full);
        }
        let record = self.redo.pop().ok_or(HistoryError::Empty)?;
        self.visible.push(record.clone());
        // max_size >= 1 here, so eviction can only remove older entries.
        while self.visible.len() > self.max_size {
            self.visible.remove(0);
        }
        Ok(record)
    }

    /// Discard the visible history and both stacks unconditionally.
    pub fn clear(&mut self) {
        self.visible.clear();
        self.redo.clear();
    }

    /// Read-only view of the visible history, oldest first.
    pub fn snapshot(&self) -> &[CalculationRecord] {
        &self.visible
    }

    /// Read-only view of the redo stack, in undo order (next redo last).
    pub fn redo_stack(&self) -> &[CalculationRecord] {
        &self.redo
    }

    /// Replace the visible history wholesale, clearing the redo stack.
    ///
    /// Used when loading persisted history; the same FIFO bound applies.
    pub fn replace(&mut self, records: Vec<CalculationRecord>) {
        self.visible = records;
        self.redo.clear();
        while self.visible.len() > self.max_size {
            self.visible.remove(0);
        }
    }

    /// Number of visible records.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the visible history is empty.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The configured bound on visible history.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
