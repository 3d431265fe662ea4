//! Error types for format readers and writers

use thiserror::Error;

/// Format reader/writer errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: frequency {value:?} is not an integer")]
    MalformedFrequency { line: usize, value: String },
}

impl Error {
    /// Whether this error describes a single bad record rather than a
    /// failure of the underlying file
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            Error::MissingField { .. } | Error::MalformedFrequency { .. }
        )
    }
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
