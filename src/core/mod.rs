//! Pure calculation core.
//!
//! This module contains the side-effect-free heart of the session engine:
//! - Operation kinds and their pure computations, behind a dispatch table
//! - Immutable calculation records
//! - Bounded undo/redo history over those records
//!
//! Nothing here touches the filesystem, the clock, or the environment;
//! effects live in the `notify` and `persistence` modules.

mod error;
mod history;
mod operation;
mod record;

pub use error::{ArithmeticError, HistoryError};
pub use history::HistoryManager;
pub use operation::{Computation, OperationKind, OperationRegistry, OVERFLOW_CEILING};
pub use record::CalculationRecord;
