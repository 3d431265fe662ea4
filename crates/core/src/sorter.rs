//! Corpus sorter: raw frequency dump → `word,count` list
//!
//! Drops blank and truncated lines, lowercases each word, and keeps only
//! alphabetic words whose frequency is strictly greater than the configured
//! minimum. Output preserves input order.

use crate::paths::same_path;
use crate::progress::{Progress, PROGRESS_INTERVAL};
use crate::{Error, MalformedPolicy, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use trfreq_filters::corpus_filter::DEFAULT_MIN_FREQUENCY;
use trfreq_filters::{CaseMode, FrequencyFilter, FrequencyFilterConfig, Rejection, TextNormalizer};
use trfreq_formats::{FreqEntry, FreqListWriter, ParsedLine, RawCorpusReader, WriteMode};

/// Default raw dump location
pub const DEFAULT_RAW_PATH: &str = "turkish_freq_list_raw.txt";
/// Default sorter output location
pub const DEFAULT_SORTED_PATH: &str = "tr_freq_list_v1.txt";

/// Corpus sorter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Frequencies must be strictly greater than this
    pub min_frequency: i64,
    pub casing: CaseMode,
    /// NFC-compose words before lowercasing
    pub unicode_nfc: bool,
    pub on_malformed: MalformedPolicy,
    /// Stage output in a temp file and rename on success
    pub atomic_write: bool,
    /// Compute statistics without writing output
    pub dry_run: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_RAW_PATH),
            output_path: PathBuf::from(DEFAULT_SORTED_PATH),
            min_frequency: DEFAULT_MIN_FREQUENCY,
            casing: CaseMode::Unicode,
            unicode_nfc: false,
            on_malformed: MalformedPolicy::Fail,
            atomic_write: true,
            dry_run: false,
        }
    }
}

impl SortConfig {
    /// Default options with explicit paths
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }
}

/// Corpus sorter statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortStats {
    pub lines_read: usize,
    /// Blank or truncated lines
    pub short_lines: usize,
    /// Lines skipped under [`MalformedPolicy::Skip`]
    pub malformed_lines: usize,
    pub non_alphabetic: usize,
    pub below_min_frequency: usize,
    pub accepted: usize,
}

impl SortStats {
    /// Lines that did not make it into the output
    pub fn dropped(&self) -> usize {
        self.lines_read - self.accepted
    }

    /// Percentage of input lines kept
    pub fn retention_rate(&self) -> f64 {
        if self.lines_read > 0 {
            (self.accepted as f64 / self.lines_read as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Per-line classification for the corpus sorter
pub struct CorpusSorter {
    normalizer: TextNormalizer,
    filter: FrequencyFilter,
    policy: MalformedPolicy,
    stats: SortStats,
}

impl CorpusSorter {
    pub fn new(config: &SortConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(config.casing, config.unicode_nfc),
            filter: FrequencyFilter::new(FrequencyFilterConfig {
                min_frequency: config.min_frequency,
            }),
            policy: config.on_malformed,
            stats: SortStats::default(),
        }
    }

    /// Classify one parsed line, returning the entry to write if it is kept
    pub fn process(
        &mut self,
        line: trfreq_formats::Result<ParsedLine>,
    ) -> Result<Option<FreqEntry>> {
        self.stats.lines_read += 1;

        let record = match line {
            Ok(ParsedLine::Record(record)) => record,
            Ok(ParsedLine::Short { line, fields }) => {
                debug!("Skipping line {} with {} field(s)", line, fields);
                self.stats.short_lines += 1;
                return Ok(None);
            }
            Err(e) if e.is_malformed_record() && self.policy == MalformedPolicy::Skip => {
                warn!("Skipping malformed record: {}", e);
                self.stats.malformed_lines += 1;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let word = self.normalizer.normalize(&record.word);
        match self.filter.check(&word, record.frequency) {
            Ok(()) => {
                self.stats.accepted += 1;
                Ok(Some(FreqEntry::new(word, record.frequency, record.source_line)))
            }
            Err(Rejection::NotAlphabetic) => {
                self.stats.non_alphabetic += 1;
                Ok(None)
            }
            Err(Rejection::BelowMinFrequency) => {
                self.stats.below_min_frequency += 1;
                Ok(None)
            }
        }
    }

    pub fn stats(&self) -> &SortStats {
        &self.stats
    }

    pub fn into_stats(self) -> SortStats {
        self.stats
    }
}

/// Run the corpus sorter over `config.input_path`
pub fn sort_corpus(config: &SortConfig) -> Result<SortStats> {
    sort_corpus_with_progress(config, |_| {})
}

/// Run the corpus sorter, reporting progress every [`PROGRESS_INTERVAL`]
/// lines and once at the end
pub fn sort_corpus_with_progress<F>(config: &SortConfig, mut on_progress: F) -> Result<SortStats>
where
    F: FnMut(&Progress),
{
    info!("Sorting corpus");
    info!("  Input: {:?}", config.input_path);
    info!("  Output: {:?}", config.output_path);
    info!("  Minimum frequency: > {}", config.min_frequency);

    let mut reader = RawCorpusReader::open(&config.input_path)?;
    let mut writer = open_output(
        &config.input_path,
        &config.output_path,
        config.dry_run,
        config.atomic_write,
    )?;
    let mut sorter = CorpusSorter::new(config);

    let snapshot = |reader: &RawCorpusReader<_>, stats: &SortStats| Progress {
        bytes_processed: reader.bytes_processed(),
        total_bytes: reader.total_bytes(),
        lines: stats.lines_read,
        kept: stats.accepted,
        dropped: stats.dropped(),
    };

    while let Some(line) = reader.next() {
        if let Some(entry) = sorter.process(line)? {
            if let Some(w) = writer.as_mut() {
                w.write_entry(&entry)?;
            }
        }

        if sorter.stats().lines_read % PROGRESS_INTERVAL == 0 {
            on_progress(&snapshot(&reader, sorter.stats()));
        }
    }

    if let Some(w) = writer {
        w.finish()?;
    }
    on_progress(&snapshot(&reader, sorter.stats()));

    let stats = sorter.into_stats();
    info!(
        "Sorted {} lines: {} kept, {} short, {} non-alphabetic, {} rare, {} malformed",
        stats.lines_read,
        stats.accepted,
        stats.short_lines,
        stats.non_alphabetic,
        stats.below_min_frequency,
        stats.malformed_lines
    );

    Ok(stats)
}

/// Open the stage output unless this is a dry run
///
/// A direct write would truncate its own input, so `input == output` is
/// only accepted for atomic writes.
pub(crate) fn open_output(
    input: &Path,
    output: &Path,
    dry_run: bool,
    atomic_write: bool,
) -> Result<Option<FreqListWriter>> {
    if dry_run {
        info!("  Dry run: no output will be written");
        return Ok(None);
    }
    let mode = if atomic_write {
        WriteMode::Atomic
    } else {
        if same_path(input, output) {
            return Err(Error::InvalidConfig(format!(
                "output {:?} is the input; direct writes would truncate it",
                output
            )));
        }
        WriteMode::Direct
    };
    Ok(Some(FreqListWriter::create_with_mode(output, mode)?))
}
