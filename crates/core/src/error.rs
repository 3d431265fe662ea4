//! Error types for the cleaning stages

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage errors
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] trfreq_formats::Error),

    #[error(transparent)]
    Filter(#[from] trfreq_filters::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for stage operations
pub type Result<T> = std::result::Result<T, Error>;

/// What to do with a record whose fields are present but unusable
/// (non-integer frequency, missing frequency column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the run
    #[default]
    Fail,
    /// Count the record, log a warning and continue
    Skip,
}
