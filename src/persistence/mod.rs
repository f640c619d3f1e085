//! File-based history persistence.
//!
//! History is persisted as a CSV table with one header row and one row per
//! record in ascending sequence order:
//!
//! ```text
//! sequence,operation,operand_left,operand_right,result
//! 1,add,10.0,5.0,15.0
//! 2,multiply,3.0,4.0,12.0
//! ```

mod error;

pub use error::PersistenceError;

use crate::core::{CalculationRecord, OperationKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const COLUMNS: [&str; 5] = [
    "sequence",
    "operation",
    "operand_left",
    "operand_right",
    "result",
];

/// One persisted history row; field order defines the CSV columns.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    sequence: u64,
    operation: OperationKind,
    operand_left: f64,
    operand_right: f64,
    result: f64,
}

impl From<&CalculationRecord> for HistoryRow {
    fn from(record: &CalculationRecord) -> Self {
        Self {
            sequence: record.sequence,
            operation: record.kind,
            operand_left: record.left,
            operand_right: record.right,
            result: record.result,
        }
    }
}

impl From<HistoryRow> for CalculationRecord {
    fn from(row: HistoryRow) -> Self {
        Self {
            kind: row.operation,
            left: row.operand_left,
            right: row.operand_right,
            result: row.result,
            sequence: row.sequence,
        }
    }
}

/// Saves and loads full history row sets at a fixed path.
///
/// `save` truncates any prior file and writes the complete set; `load`
/// reads the complete set back. File handles are scoped to each call and
/// closed on every exit path.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full record set, replacing any existing file.
    pub fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        if records.is_empty() {
            // serialize() emits the header lazily; keep it for empty sets too.
            writer.write_record(COLUMNS)?;
        }
        for record in records {
            writer.serialize(HistoryRow::from(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read the full record set back, in file order.
    pub fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<HistoryRow>() {
            records.push(row?.into());
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: u64, kind: OperationKind, result: f64) -> CalculationRecord {
        CalculationRecord {
            kind,
            left: 10.0,
            right: 5.0,
            result,
            sequence,
        }
    }

    #[test]
    fn save_then_load_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));

        let records = vec![
            record(1, OperationKind::Add, 15.0),
            record(2, OperationKind::Divide, 2.0),
            record(3, OperationKind::AbsoluteDifference, 5.0),
        ];
        store.save(&records).unwrap();

        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn save_truncates_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));

        store
            .save(&[record(1, OperationKind::Add, 15.0), record(2, OperationKind::Add, 16.0)])
            .unwrap();
        store.save(&[record(9, OperationKind::Multiply, 12.0)]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].sequence, 9);
    }

    #[test]
    fn file_has_expected_header_and_row_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        store.save(&[record(1, OperationKind::IntegerDivide, 2.0)]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("sequence,operation,operand_left,operand_right,result")
        );
        assert_eq!(lines.next(), Some("1,integer_divide,10.0,5.0,2.0"));
    }

    #[test]
    fn empty_history_saves_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.csv"));
        store.save(&[]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents.trim_end(),
            "sequence,operation,operand_left,operand_right,result"
        );
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn loading_a_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("absent.csv"));
        assert!(store.load().is_err());
    }
}
