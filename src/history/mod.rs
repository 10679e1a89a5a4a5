//! # History Module
//!
//! Session-wide play history and its CSV export.
//!
//! Records accumulate across every run of a session, including runs that
//! ended in death, and are written out once when the session ends.

use crate::CavernResult;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

/// Column names of the exported history file.
pub const HISTORY_HEADER: [&str; 3] = ["current_location", "current_experience", "current_date"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One resolved turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    /// Hero location after the turn
    pub location: String,
    /// Hero score after the turn
    pub score: u64,
    /// Wall-clock time the turn was recorded
    pub timestamp: DateTime<Local>,
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    current_location: &'a str,
    current_experience: u64,
    current_date: String,
}

impl<'a> From<&'a RunRecord> for HistoryRow<'a> {
    fn from(record: &'a RunRecord) -> Self {
        Self {
            current_location: &record.location,
            current_experience: record.score,
            current_date: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Append-only log of every turn in the session.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: Vec<RunRecord>,
}

impl HistoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record stamped with the current local time.
    pub fn record(&mut self, location: &str, score: u64) {
        self.push(RunRecord {
            location: location.to_string(),
            score,
            timestamp: Local::now(),
        });
    }

    /// Appends a prepared record.
    pub fn push(&mut self, record: RunRecord) {
        self.records.push(record);
    }

    /// All records so far, oldest first.
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Number of records logged this session.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no turn has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the whole log to `path`, replacing any existing file.
    ///
    /// The header row is always written, even for an empty session.
    pub fn flush(&self, path: impl AsRef<Path>) -> CavernResult<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(HISTORY_HEADER)?;
        for record in &self.records {
            writer.serialize(HistoryRow::from(record))?;
        }
        writer.flush()?;

        log::info!(
            "Wrote {} history records to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }
}
