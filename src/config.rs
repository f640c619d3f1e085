//! Session configuration.
//!
//! A `SessionConfig` is constructed once at startup and passed by reference
//! into the session; no component reads the process environment directly.
//! The REPL binary maps `RECKONER_*` environment variables and flags onto
//! this struct through its argument parser.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Settings consumed by the session and its observers.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Directory holding the commit log file
    pub log_dir: PathBuf,
    /// File name of the commit log, inside `log_dir`
    pub log_file_name: String,
    /// Directory holding persisted history files
    pub history_dir: PathBuf,
    /// File name of the persisted history, inside `history_dir`
    pub history_file_name: String,
    /// Bound on visible history entries; oldest evicted first
    pub max_history_size: usize,
    /// Whether the autosave observer writes after every commit
    pub auto_save: bool,
    /// Decimal places results are rounded to (half-to-even)
    pub precision: u32,
    /// Magnitude ceiling on accepted operands
    pub max_input_value: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file_name: "calculations.log".to_string(),
            history_dir: PathBuf::from("history"),
            history_file_name: "calculation_history.csv".to_string(),
            max_history_size: 100,
            auto_save: true,
            precision: 4,
            max_input_value: 1e9,
        }
    }
}

impl SessionConfig {
    /// Full path of the commit log file.
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    /// Full path of the persisted history file.
    pub fn history_file_path(&self) -> PathBuf {
        self.history_dir.join(&self.history_file_name)
    }

    /// Create the log and history directories if they do not exist.
    ///
    /// Failure here is fatal to the caller: no session can run without a
    /// place to log and save.
    pub fn ensure_directories(&self) -> io::Result<()> {
        create_dir_if_missing(&self.log_dir)?;
        create_dir_if_missing(&self.history_dir)
    }
}

fn create_dir_if_missing(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}
