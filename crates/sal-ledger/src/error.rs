/// Invariant violations on attendance counts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("present + absent days ({present} + {absent}) cannot exceed working days ({working_days})")]
    ExceedsWorkingDays {
        present: i64,
        absent: i64,
        working_days: i64,
    },

    #[error("day counts cannot be negative")]
    NegativeDays,

    #[error("days to add cannot be negative (got {delta})")]
    NegativeDelta { delta: i64 },
}

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no record found for roll number {roll_number} in {month}")]
    NotFound { roll_number: i64, month: String },

    #[error("a record for roll number {roll_number} in {month} already exists; use update instead")]
    Duplicate { roll_number: i64, month: String },
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
