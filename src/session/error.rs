//! The user-facing session error taxonomy.
//!
//! Component errors are folded into a single enum so the front end has one
//! type to render and re-prompt on. Nothing here is fatal to the process.

use crate::core::{ArithmeticError, HistoryError};
use crate::persistence::PersistenceError;
use thiserror::Error;

/// Every error a session operation can return.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Operand rejected before computation: non-finite or too large
    #[error("Operand {value} is not a finite number within +/-{max}")]
    InvalidOperand { value: f64, max: f64 },

    /// Resolution or computation failure from the operation registry
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Undo/redo failure from the history manager
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Save/load failure from the history store
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
