//! Committed calculation records.

use super::operation::OperationKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable record of one committed calculation.
///
/// Records are created only when a computation succeeds and are never
/// mutated afterwards; undo/redo moves whole records between the visible
/// history and the redo stack. `sequence` is assigned at commit time,
/// increases monotonically within a session, and is never reused.
///
/// # Example
///
/// ```rust
/// use reckoner::core::{CalculationRecord, OperationKind};
///
/// let record = CalculationRecord {
///     kind: OperationKind::Add,
///     left: 10.0,
///     right: 5.0,
///     result: 15.0,
///     sequence: 1,
/// };
/// assert_eq!(record.to_string(), "10 + 5 = 15");
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Which operation produced this record
    pub kind: OperationKind,
    /// Left operand as supplied by the caller
    pub left: f64,
    /// Right operand as supplied by the caller
    pub right: f64,
    /// Result, already rounded to the session precision
    pub result: f64,
    /// Monotonic commit counter, unique within a session
    pub sequence: u64,
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.symbol() {
            Some(symbol) => write!(
                f,
                "{} {} {} = {}",
                self.left, symbol, self.right, self.result
            ),
            None => write!(
                f,
                "{}({}, {}) = {}",
                self.kind, self.left, self.right, self.result
            ),
        }
    }
}
