//! Reckoner: an interactive calculation session engine.
//!
//! Reckoner accepts discrete arithmetic requests, computes them through a
//! pluggable registry of pure operations, and keeps a bounded, reversible
//! history of committed calculations. Each commit is published to an
//! ordered list of observers (logging, autosave) whose side effects are
//! isolated from the calculation logic.
//!
//! # Core Concepts
//!
//! - **OperationRegistry**: dispatch table from operation kind to a pure
//!   binary computation
//! - **HistoryManager**: undo/redo over immutable calculation records,
//!   bounded with FIFO eviction
//! - **NotificationBus**: synchronous, ordered, failure-isolated commit
//!   notifications
//! - **SessionController**: orchestrates compute, commit, publish
//!
//! # Example
//!
//! ```rust
//! use reckoner::core::OperationKind;
//! use reckoner::{SessionConfig, SessionController};
//!
//! let mut session = SessionController::new(SessionConfig::default());
//!
//! session.evaluate(OperationKind::Add, 10.0, 5.0).unwrap();
//! session.evaluate(OperationKind::Multiply, 3.0, 4.0).unwrap();
//! assert_eq!(session.history().len(), 2);
//!
//! // Undo exposes the previous top; redo restores the undone record.
//! let top = session.undo().unwrap();
//! assert_eq!(top.unwrap().result, 15.0);
//! let restored = session.redo().unwrap();
//! assert_eq!(restored.result, 12.0);
//! ```

pub mod config;
pub mod core;
pub mod notify;
pub mod persistence;
pub mod session;

// Re-export the types most callers need.
pub use config::SessionConfig;
pub use session::{CommitOutcome, SessionController, SessionError, SessionPhase};
