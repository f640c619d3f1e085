//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while saving or loading history files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem-level failure (open, create, flush)
    #[error("History file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unwritable CSV content
    #[error("History file format error: {0}")]
    Csv(#[from] csv::Error),
}
