use tracing::warn;

use sal_ledger::{AttendanceRecord, Ledger, LedgerError, UpdateField};
use sal_store::{AttendanceStore, StoreError};

/// Errors surfaced to the user by application operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("could not persist the ledger: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// The running application: the in-memory ledger plus its backing store.
///
/// Every mutation is applied in memory and then flushed as a full rewrite
/// of the store. When the flush fails the previous in-memory state is
/// restored before the error propagates, so ledger and store never
/// disagree.
pub struct App {
    ledger: Ledger,
    store: Box<dyn AttendanceStore>,
}

impl App {
    /// Load the ledger from the store.
    pub fn open(store: Box<dyn AttendanceStore>) -> AppResult<Self> {
        let records = store.load()?;
        let ledger = Ledger::from_records(records)?;
        Ok(Self { ledger, store })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Look up one record; the month is title-cased before the lookup.
    pub fn get(&self, roll_number: i64, month: &str) -> Option<&AttendanceRecord> {
        self.ledger.get(roll_number, month)
    }

    /// Validate, append, and persist a new record.
    pub fn add_record(
        &mut self,
        roll_number: i64,
        student_name: &str,
        month: &str,
        present: i64,
        absent: i64,
        working_days: i64,
    ) -> AppResult<AttendanceRecord> {
        let snapshot = self.ledger.clone();
        let record = self.ledger.add_record(
            roll_number,
            student_name,
            month,
            present,
            absent,
            working_days,
        )?;
        self.flush(snapshot)?;
        Ok(record)
    }

    /// Adjust one counter of an existing record and persist.
    pub fn update_attendance(
        &mut self,
        roll_number: i64,
        month: &str,
        delta: i64,
        field: UpdateField,
    ) -> AppResult<AttendanceRecord> {
        let snapshot = self.ledger.clone();
        let record = self
            .ledger
            .update_attendance(roll_number, month, delta, field)?;
        self.flush(snapshot)?;
        Ok(record)
    }

    /// All records in insertion order.
    pub fn full_report(&self) -> &[AttendanceRecord] {
        self.ledger.full_report()
    }

    /// Records for one roll number, in insertion order.
    pub fn student_report(&self, roll_number: i64) -> Vec<&AttendanceRecord> {
        self.ledger.student_report(roll_number)
    }

    fn flush(&mut self, previous: Ledger) -> AppResult<()> {
        if let Err(err) = self.store.save(self.ledger.records()) {
            warn!(error = %err, "flush failed; restoring previous ledger state");
            self.ledger = previous;
            return Err(err.into());
        }
        Ok(())
    }
}
