//! Standard commit observers: logging and autosave.

use super::{CommitObserver, ObserverError};
use crate::core::CalculationRecord;
use crate::persistence::HistoryStore;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Appends one timestamped line per commit to a log file.
pub struct LoggingObserver {
    path: PathBuf,
    precision: u32,
}

impl LoggingObserver {
    /// Create an observer writing to `path`, formatting results to
    /// `precision` decimal places.
    pub fn new(path: impl Into<PathBuf>, precision: u32) -> Self {
        Self {
            path: path.into(),
            precision,
        }
    }
}

impl CommitObserver for LoggingObserver {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_committed(
        &mut self,
        record: &CalculationRecord,
        _history: &[CalculationRecord],
    ) -> Result<(), ObserverError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(
            file,
            "[{timestamp}] {}: operands=({}, {}), result={:.prec$}",
            record.kind,
            record.left,
            record.right,
            record.result,
            prec = self.precision as usize,
        )?;
        Ok(())
    }
}

/// Saves the full visible history after every commit, when enabled.
///
/// The observer holds its own store; when auto-save is disabled it is a
/// registered no-op, matching the configuration gate rather than dropping
/// the subscription.
pub struct AutoSaveObserver {
    store: HistoryStore,
    enabled: bool,
}

impl AutoSaveObserver {
    /// Create an observer saving through `store` when `enabled` is true.
    pub fn new(store: HistoryStore, enabled: bool) -> Self {
        Self { store, enabled }
    }
}

impl CommitObserver for AutoSaveObserver {
    fn name(&self) -> &str {
        "autosave"
    }

    fn on_committed(
        &mut self,
        _record: &CalculationRecord,
        history: &[CalculationRecord],
    ) -> Result<(), ObserverError> {
        if !self.enabled {
            return Ok(());
        }
        self.store.save(history)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OperationKind;

    fn record(sequence: u64) -> CalculationRecord {
        CalculationRecord {
            kind: OperationKind::Divide,
            left: 10.0,
            right: 4.0,
            result: 2.5,
            sequence,
        }
    }

    #[test]
    fn logging_observer_appends_one_line_per_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calculations.log");
        let mut observer = LoggingObserver::new(&path, 4);

        observer.on_committed(&record(1), &[record(1)]).unwrap();
        observer
            .on_committed(&record(2), &[record(1), record(2)])
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("divide: operands=(10, 4), result=2.5000"));
    }

    #[test]
    fn logging_observer_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the log file makes the open fail.
        let path = dir.path().join("not-a-file");
        std::fs::create_dir(&path).unwrap();
        let mut observer = LoggingObserver::new(&path, 4);

        assert!(observer.on_committed(&record(1), &[record(1)]).is_err());
    }

    #[test]
    fn autosave_observer_writes_the_full_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        let mut observer = AutoSaveObserver::new(store.clone(), true);

        let history = vec![record(1), record(2)];
        observer.on_committed(&record(2), &history).unwrap();

        assert_eq!(store.load().unwrap(), history);
    }

    #[test]
    fn disabled_autosave_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut observer = AutoSaveObserver::new(HistoryStore::new(&path), false);

        observer.on_committed(&record(1), &[record(1)]).unwrap();

        assert!(!path.exists());
    }
}
