//! Streaming reader for raw tab-delimited frequency dumps
//!
//! Each line of a dump looks like `<rank>\t<word>\t<frequency>\t...`. Lines
//! with fewer than three fields (blank lines, truncated rows) are reported
//! as [`ParsedLine::Short`] so callers can skip them without treating them
//! as errors. A frequency field that is present but not an integer is a
//! real defect and comes back as [`Error::MalformedFrequency`].

use crate::reader::open_text;
use crate::{Error, RawRecord, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Minimum number of tab-separated fields a usable line must have
pub const RAW_MIN_FIELDS: usize = 3;

const WORD_FIELD: usize = 1;
const FREQUENCY_FIELD: usize = 2;

/// Outcome of parsing one raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A line carrying a word and a frequency
    Record(RawRecord),
    /// A line with too few fields to carry a record
    Short { line: usize, fields: usize },
}

/// Parse a single raw dump line.
///
/// Surrounding whitespace is trimmed before splitting, so leading tabs do
/// not count as empty fields.
pub fn parse_raw_line(line: &str, line_number: usize) -> Result<ParsedLine> {
    let fields: Vec<&str> = line.trim().split('\t').collect();

    if fields.len() < RAW_MIN_FIELDS {
        return Ok(ParsedLine::Short {
            line: line_number,
            fields: fields.len(),
        });
    }

    let frequency_field = fields[FREQUENCY_FIELD];
    let frequency = parse_frequency(frequency_field).ok_or_else(|| Error::MalformedFrequency {
        line: line_number,
        value: frequency_field.to_string(),
    })?;

    Ok(ParsedLine::Record(RawRecord {
        word: fields[WORD_FIELD].to_string(),
        frequency,
        source_line: line_number,
    }))
}

/// Parse a base-10 frequency, tolerating surrounding whitespace
pub fn parse_frequency(field: &str) -> Option<i64> {
    field.trim().parse::<i64>().ok()
}

/// Streaming reader that parses a raw dump line by line
pub struct RawCorpusReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
    buffer: String,
}

impl RawCorpusReader<Box<dyn Read>> {
    /// Open a raw dump, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = open_text(path)?;
        Ok(Self::with_total_bytes(source.reader, source.total_bytes))
    }
}

impl<R: Read> RawCorpusReader<R> {
    /// Create a reader over any byte source
    pub fn new(reader: R) -> Self {
        Self::with_total_bytes(reader, None)
    }

    fn with_total_bytes(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            reader: BufReader::with_capacity(64 * 1024, reader),
            line_number: 0,
            bytes_read: 0,
            total_bytes,
            buffer: String::new(),
        }
    }

    /// Number of lines read so far
    pub fn lines_processed(&self) -> usize {
        self.line_number
    }

    /// Number of (decoded) bytes read so far
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Total input size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: Read> Iterator for RawCorpusReader<R> {
    type Item = Result<ParsedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(n) => {
                self.bytes_read += n as u64;
                self.line_number += 1;
                Some(parse_raw_line(&self.buffer, self.line_number))
            }
            Err(e) => Some(Err(Error::Io(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(word: &str, frequency: i64, source_line: usize) -> ParsedLine {
        ParsedLine::Record(RawRecord {
            word: word.to_string(),
            frequency,
            source_line,
        })
    }

    #[test]
    fn test_parse_full_line() {
        let parsed = parse_raw_line("123\tKalem\t5\textra\n", 1).unwrap();
        assert_eq!(parsed, record("Kalem", 5, 1));
    }

    #[test]
    fn test_parse_blank_line_is_short() {
        assert_eq!(
            parse_raw_line("", 4).unwrap(),
            ParsedLine::Short { line: 4, fields: 1 }
        );
        assert_eq!(
            parse_raw_line("\n", 5).unwrap(),
            ParsedLine::Short { line: 5, fields: 1 }
        );
    }

    #[test]
    fn test_parse_two_fields_is_short() {
        assert_eq!(
            parse_raw_line("1\tkalem", 2).unwrap(),
            ParsedLine::Short { line: 2, fields: 2 }
        );
    }

    #[test]
    fn test_leading_tab_is_trimmed() {
        // The leading empty field disappears with the surrounding whitespace.
        assert_eq!(
            parse_raw_line("\tkalem\t5", 1).unwrap(),
            ParsedLine::Short { line: 1, fields: 2 }
        );
    }

    #[test]
    fn test_malformed_frequency() {
        let err = parse_raw_line("1\tkalem\tbeş", 9).unwrap_err();
        match err {
            Error::MalformedFrequency { line, value } => {
                assert_eq!(line, 9);
                assert_eq!(value, "beş");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_frequency_whitespace_and_sign() {
        assert_eq!(parse_frequency(" 12 "), Some(12));
        assert_eq!(parse_frequency("+3"), Some(3));
        assert_eq!(parse_frequency("-3"), Some(-3));
        assert_eq!(parse_frequency("1.5"), None);
        assert_eq!(parse_frequency(""), None);
    }

    #[test]
    fn test_reader_yields_lines_in_order() {
        let data = "1\tev\t10\n\n2\tokul\t7\n3\tx\n";
        let reader = RawCorpusReader::new(data.as_bytes());
        let lines: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(
            lines,
            vec![
                record("ev", 10, 1),
                ParsedLine::Short { line: 2, fields: 1 },
                record("okul", 7, 3),
                ParsedLine::Short { line: 4, fields: 2 },
            ]
        );
    }

    #[test]
    fn test_reader_progress_tracking() {
        let data = "1\tev\t10\n2\tokul\t7\n";
        let mut reader = RawCorpusReader::new(data.as_bytes());

        assert_eq!(reader.lines_processed(), 0);
        assert_eq!(reader.bytes_processed(), 0);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 1);
        assert_eq!(reader.bytes_processed(), 8);
    }

    #[test]
    fn test_reader_invalid_utf8_is_io_error() {
        let data: &[u8] = b"1\t\xff\xfe\t3\n";
        let mut reader = RawCorpusReader::new(data);
        assert!(matches!(reader.next(), Some(Err(Error::Io(_)))));
    }

    #[test]
    fn test_reader_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "1\tçay\t20").unwrap();
        writeln!(temp_file, "2\tsu\t3").unwrap();
        temp_file.flush().unwrap();

        let reader = RawCorpusReader::open(temp_file.path()).unwrap();
        assert_eq!(reader.total_bytes(), Some(17));
        let lines: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], record("çay", 20, 1));
    }
}
