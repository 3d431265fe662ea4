//! Progress snapshots handed to callers while a stage runs

/// Number of input lines between progress callbacks
pub const PROGRESS_INTERVAL: usize = 1000;

/// Point-in-time view of a running stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub bytes_processed: u64,
    /// Input size when known (not for compressed inputs)
    pub total_bytes: Option<u64>,
    /// Input lines or rows seen so far
    pub lines: usize,
    /// Entries accepted so far
    pub kept: usize,
    /// Entries dropped so far, for any reason
    pub dropped: usize,
}
