/// Errors from attendance store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row in the attendance file could not be decoded.
    #[error("malformed attendance file: {0}")]
    Malformed(String),
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => StoreError::Io(io),
                _ => unreachable!(),
            }
        } else {
            StoreError::Malformed(err.to_string())
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
