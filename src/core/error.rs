//! Error types for the pure calculation core.

use thiserror::Error;

/// Errors that can occur while resolving or computing an operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    /// No computation is registered for the requested operation name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Division-like operation with a zero right operand
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Root with degree zero, or a negative base with no real root
    #[error("No real root for these operands")]
    InvalidRoot,

    /// Result exceeds the overflow ceiling or is not a finite number
    #[error("Result is too large to represent")]
    Overflow,
}

/// Errors that can occur while navigating history.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Undo with no visible history, or redo with an empty redo stack
    #[error("Nothing to undo or redo")]
    Empty,

    /// Redo rejected because re-appending would evict the restored record
    #[error("History is full; redo would discard the restored entry")]
    Full,
}
