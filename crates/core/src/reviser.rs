//! Alphabet reviser: `word,count` list → entries spelled only with allowed
//! letters
//!
//! A word with even one character outside the alphabet is dropped whole;
//! entries are never rewritten. Frequencies pass through untouched.

use crate::progress::{Progress, PROGRESS_INTERVAL};
use crate::sorter::{open_output, DEFAULT_SORTED_PATH};
use crate::{MalformedPolicy, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use trfreq_filters::{Alphabet, AlphabetConfig};
use trfreq_formats::{FreqEntry, FreqLine, FreqListReader};

/// Default reviser output location
pub const DEFAULT_REVISED_PATH: &str = "tr_freq_list.txt";

/// Alphabet reviser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviseConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub on_malformed: MalformedPolicy,
    /// Stage output in a temp file and rename on success
    pub atomic_write: bool,
    /// Compute statistics without writing output
    pub dry_run: bool,
    pub alphabet: AlphabetConfig,
}

impl Default for ReviseConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_SORTED_PATH),
            output_path: PathBuf::from(DEFAULT_REVISED_PATH),
            on_malformed: MalformedPolicy::Fail,
            atomic_write: true,
            dry_run: false,
            alphabet: AlphabetConfig::default(),
        }
    }
}

impl ReviseConfig {
    /// Default options with explicit paths
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }
}

/// Alphabet reviser statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviseStats {
    pub rows_read: usize,
    pub blank_lines: usize,
    /// Rows skipped under [`MalformedPolicy::Skip`]
    pub malformed_lines: usize,
    /// Entries with at least one disallowed character
    pub rejected: usize,
    pub accepted: usize,
    /// First disallowed character of each rejected word, with counts
    pub rejected_chars: BTreeMap<char, usize>,
}

impl ReviseStats {
    /// Rows that did not make it into the output
    pub fn dropped(&self) -> usize {
        self.rows_read - self.accepted
    }

    /// The `n` characters responsible for the most rejections, most frequent
    /// first
    pub fn top_rejected_chars(&self, n: usize) -> Vec<(char, usize)> {
        let mut chars: Vec<(char, usize)> =
            self.rejected_chars.iter().map(|(&c, &count)| (c, count)).collect();
        chars.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        chars.truncate(n);
        chars
    }
}

/// Per-row classification for the alphabet reviser
pub struct AlphabetReviser {
    alphabet: Alphabet,
    policy: MalformedPolicy,
    stats: ReviseStats,
}

impl AlphabetReviser {
    pub fn new(config: &ReviseConfig) -> Result<Self> {
        let alphabet = Alphabet::new(&config.alphabet)?;
        Ok(Self::with_alphabet(alphabet, config.on_malformed))
    }

    pub fn with_alphabet(alphabet: Alphabet, policy: MalformedPolicy) -> Self {
        Self {
            alphabet,
            policy,
            stats: ReviseStats::default(),
        }
    }

    /// Classify one row, returning the entry to write if it is kept
    pub fn process(
        &mut self,
        line: trfreq_formats::Result<FreqLine>,
    ) -> Result<Option<FreqEntry>> {
        self.stats.rows_read += 1;

        let entry = match line {
            Ok(FreqLine::Entry(entry)) => entry,
            Ok(FreqLine::Blank { line }) => {
                debug!("Skipping blank line {}", line);
                self.stats.blank_lines += 1;
                return Ok(None);
            }
            Err(e) if e.is_malformed_record() && self.policy == MalformedPolicy::Skip => {
                warn!("Skipping malformed record: {}", e);
                self.stats.malformed_lines += 1;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match self.alphabet.first_disallowed(&entry.word) {
            None => {
                self.stats.accepted += 1;
                Ok(Some(entry))
            }
            Some(c) => {
                debug!("Dropping {:?}: {:?} is not allowed", entry.word, c);
                self.stats.rejected += 1;
                *self.stats.rejected_chars.entry(c).or_insert(0) += 1;
                Ok(None)
            }
        }
    }

    pub fn stats(&self) -> &ReviseStats {
        &self.stats
    }

    pub fn into_stats(self) -> ReviseStats {
        self.stats
    }
}

/// Run the alphabet reviser over `config.input_path`
pub fn revise_alphabet(config: &ReviseConfig) -> Result<ReviseStats> {
    revise_alphabet_with_progress(config, |_| {})
}

/// Run the alphabet reviser, reporting progress every
/// [`PROGRESS_INTERVAL`] rows and once at the end
pub fn revise_alphabet_with_progress<F>(
    config: &ReviseConfig,
    mut on_progress: F,
) -> Result<ReviseStats>
where
    F: FnMut(&Progress),
{
    info!("Revising alphabet");
    info!("  Input: {:?}", config.input_path);
    info!("  Output: {:?}", config.output_path);

    let mut reviser = AlphabetReviser::new(config)?;
    let mut reader = FreqListReader::open(&config.input_path)?;
    let mut writer = open_output(
        &config.input_path,
        &config.output_path,
        config.dry_run,
        config.atomic_write,
    )?;

    let snapshot = |reader: &FreqListReader<_>, stats: &ReviseStats| Progress {
        bytes_processed: reader.bytes_processed(),
        total_bytes: reader.total_bytes(),
        lines: stats.rows_read,
        kept: stats.accepted,
        dropped: stats.dropped(),
    };

    while let Some(line) = reader.next() {
        if let Some(entry) = reviser.process(line)? {
            if let Some(w) = writer.as_mut() {
                w.write_entry(&entry)?;
            }
        }

        if reviser.stats().rows_read % PROGRESS_INTERVAL == 0 {
            on_progress(&snapshot(&reader, reviser.stats()));
        }
    }

    if let Some(w) = writer {
        w.finish()?;
    }
    on_progress(&snapshot(&reader, reviser.stats()));

    let stats = reviser.into_stats();
    info!(
        "Revised {} rows: {} kept, {} rejected, {} blank, {} malformed",
        stats.rows_read, stats.accepted, stats.rejected, stats.blank_lines, stats.malformed_lines
    );

    Ok(stats)
}
