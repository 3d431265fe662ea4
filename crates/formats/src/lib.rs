//! File formats for Turkish frequency-list processing
//!
//! This crate provides streaming readers for raw tab-delimited corpus
//! dumps and for `word,count` frequency lists, plus a writer that commits
//! frequency lists atomically.

pub mod error;
pub mod freq_list;
pub mod raw_corpus;
pub mod reader;
pub mod record;
pub mod writer;

pub use error::{Error, Result};
pub use freq_list::{FreqLine, FreqListReader};
pub use raw_corpus::{parse_raw_line, ParsedLine, RawCorpusReader};
pub use reader::open_text;
pub use record::{FreqEntry, RawRecord};
pub use writer::{FreqListWriter, WriteMode};
