//! Record types shared by the readers and writers

use std::fmt;

/// A word/frequency pair pulled out of a raw corpus line, before any
/// normalization or filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// The word exactly as it appears in the dump
    pub word: String,
    /// Parsed frequency count
    pub frequency: i64,
    /// 1-based line number in the source file
    pub source_line: usize,
}

/// A single `word,frequency` entry of a frequency list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqEntry {
    pub word: String,
    pub frequency: i64,
    /// 1-based line number in the file the entry was read from
    pub source_line: usize,
}

impl FreqEntry {
    /// Create a new entry
    pub fn new(word: impl Into<String>, frequency: i64, source_line: usize) -> Self {
        Self {
            word: word.into(),
            frequency,
            source_line,
        }
    }
}

/// Formats as the on-disk line without the trailing newline
impl fmt::Display for FreqEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.word, self.frequency)
    }
}
