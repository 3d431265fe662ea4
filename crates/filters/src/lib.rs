//! Word filters for Turkish frequency lists
//!
//! This crate provides the predicates applied to each frequency-list
//! entry: the alphabetic/frequency check of the corpus sorter, the allowed
//! alphabet of the reviser, and the text normalization applied to words
//! before either check.

pub mod alphabet;
pub mod corpus_filter;
pub mod error;
pub mod text_preprocessing;

pub use alphabet::{Alphabet, AlphabetConfig, EXTENDED_ACCENTED, TR_ALPHABET};
pub use corpus_filter::{FrequencyFilter, FrequencyFilterConfig, Rejection};
pub use error::{Error, Result};
pub use text_preprocessing::{CaseMode, TextNormalizer};
