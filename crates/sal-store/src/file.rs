use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use sal_ledger::AttendanceRecord;

use crate::error::StoreResult;
use crate::traits::AttendanceStore;

/// Column order of the attendance file header.
const HEADER: [&str; 7] = [
    "Roll No",
    "Student Name",
    "Month",
    "Classes Present",
    "Classes Absent",
    "Working Days",
    "Attendance Percentage",
];

/// CSV-file-backed attendance store.
///
/// The whole file is read at load and rewritten at save: one header row
/// followed by one row per record in ledger order. A missing file loads as
/// empty; nothing is written until the first save.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AttendanceStore for CsvStore {
    fn load(&self) -> StoreResult<Vec<AttendanceRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "attendance file missing; starting empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        debug!(path = %self.path.display(), count = records.len(), "attendance file loaded");
        Ok(records)
    }

    fn save(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        if records.is_empty() {
            // Serialize emits the header alongside the first record; an
            // empty ledger still needs the schema row.
            writer.write_record(HEADER)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        debug!(path = %self.path.display(), count = records.len(), "attendance file rewritten");
        Ok(())
    }
}

impl std::fmt::Debug for CsvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvStore").field("path", &self.path).finish()
    }
}
