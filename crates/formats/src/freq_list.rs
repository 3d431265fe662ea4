//! Streaming reader for `word,count` frequency lists
//!
//! Frequency lists carry no header. The `csv` crate handles quoting; this
//! module validates the field count and the frequency before handing out
//! typed entries.

use crate::raw_corpus::parse_frequency;
use crate::reader::open_text;
use crate::{Error, FreqEntry, Result};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

/// Number of fields a frequency-list row must have
pub const FREQ_LIST_FIELDS: usize = 2;

/// Outcome of reading one frequency-list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreqLine {
    Entry(FreqEntry),
    /// A row with no content
    Blank { line: usize },
}

/// Validate one CSV row and turn it into an entry
pub fn parse_freq_record(record: &StringRecord, line: usize) -> Result<FreqLine> {
    if record.is_empty() || (record.len() == 1 && record[0].trim().is_empty()) {
        return Ok(FreqLine::Blank { line });
    }

    if record.len() < FREQ_LIST_FIELDS {
        return Err(Error::MissingField {
            line,
            expected: FREQ_LIST_FIELDS,
            found: record.len(),
        });
    }

    let frequency = parse_frequency(&record[1]).ok_or_else(|| Error::MalformedFrequency {
        line,
        value: record[1].to_string(),
    })?;

    Ok(FreqLine::Entry(FreqEntry::new(&record[0], frequency, line)))
}

/// Streaming reader over a frequency list
pub struct FreqListReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
    total_bytes: Option<u64>,
    rows_read: usize,
}

impl FreqListReader<Box<dyn Read>> {
    /// Open a frequency list, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = open_text(path)?;
        Ok(Self::with_total_bytes(source.reader, source.total_bytes))
    }
}

impl<R: Read> FreqListReader<R> {
    /// Create a reader over any byte source
    pub fn new(reader: R) -> Self {
        Self::with_total_bytes(reader, None)
    }

    fn with_total_bytes(reader: R, total_bytes: Option<u64>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            reader,
            record: StringRecord::new(),
            total_bytes,
            rows_read: 0,
        }
    }

    /// Number of rows read so far
    pub fn records_processed(&self) -> usize {
        self.rows_read
    }

    /// Number of bytes consumed so far
    pub fn bytes_processed(&self) -> u64 {
        self.reader.position().byte()
    }

    /// Total input size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: Read> Iterator for FreqListReader<R> {
    type Item = Result<FreqLine>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                self.rows_read += 1;
                let line = self
                    .record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(self.rows_read);
                Some(parse_freq_record(&self.record, line))
            }
            Err(e) => Some(Err(Error::Csv(e))),
        }
    }
}
