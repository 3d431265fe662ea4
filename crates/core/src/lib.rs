//! Corpus cleaning stages for Turkish word-frequency lists
//!
//! This crate provides the two batch stages and the pipeline that chains
//! them:
//!
//! - [`sorter`]: raw tab-delimited dump → `word,count` list of alphabetic,
//!   non-rare words
//! - [`reviser`]: `word,count` list → entries whose letters all belong to
//!   the allowed alphabet
//! - [`pipeline`]: runs the sorter, then the reviser on its output

pub mod error;
pub mod paths;
pub mod pipeline;
pub mod progress;
pub mod reviser;
pub mod sorter;

pub use error::{Error, MalformedPolicy, Result};
pub use pipeline::{run_pipeline, PipelineStats, Stage};
pub use progress::Progress;
pub use reviser::{revise_alphabet, AlphabetReviser, ReviseConfig, ReviseStats};
pub use sorter::{sort_corpus, CorpusSorter, SortConfig, SortStats};
