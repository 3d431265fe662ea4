//! Alphabetic-word and minimum-frequency filtering for raw corpus entries

use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Frequencies must be strictly greater than this by default
pub const DEFAULT_MIN_FREQUENCY: i64 = 1;

/// Filter configuration for the corpus sorter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyFilterConfig {
    /// Entries need a frequency strictly greater than this
    pub min_frequency: i64,
}

impl Default for FrequencyFilterConfig {
    fn default() -> Self {
        Self {
            min_frequency: DEFAULT_MIN_FREQUENCY,
        }
    }
}

/// Why an entry was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty, or contains a non-alphabetic character
    NotAlphabetic,
    /// Frequency at or below the configured minimum
    BelowMinFrequency,
}

/// Whether `c` is in one of the Unicode letter categories (Lu, Ll, Lt, Lm, Lo)
///
/// Narrower than [`char::is_alphabetic`]: letter numbers such as `Ⅻ` and
/// combining marks such as U+0307 are not letters.
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Whether `word` is non-empty and made only of letters
pub fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_letter)
}

/// Keeps alphabetic words that occur often enough
#[derive(Debug, Clone, Default)]
pub struct FrequencyFilter {
    config: FrequencyFilterConfig,
}

impl FrequencyFilter {
    pub fn new(config: FrequencyFilterConfig) -> Self {
        Self { config }
    }

    /// Check an entry, reporting the reason on rejection
    pub fn check(&self, word: &str, frequency: i64) -> Result<(), Rejection> {
        if !is_alphabetic_word(word) {
            return Err(Rejection::NotAlphabetic);
        }
        if frequency <= self.config.min_frequency {
            return Err(Rejection::BelowMinFrequency);
        }
        Ok(())
    }

    /// Check if an entry passes the filter
    pub fn passes(&self, word: &str, frequency: i64) -> bool {
        self.check(word, frequency).is_ok()
    }

    pub fn min_frequency(&self) -> i64 {
        self.config.min_frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabetic_words() {
        assert!(is_alphabetic_word("kalem"));
        assert!(is_alphabetic_word("ağaç"));
        assert!(is_alphabetic_word("Москва"));
        assert!(!is_alphabetic_word(""));
        assert!(!is_alphabetic_word("abc123"));
        assert!(!is_alphabetic_word("iyi-kötü"));
        assert!(!is_alphabetic_word("iki kelime"));
        assert!(!is_alphabetic_word("don't"));
    }

    #[test]
    fn test_marks_and_letter_numbers_rejected() {
        assert!(!is_alphabetic_word("Ⅻ"));
        assert!(!is_alphabetic_word("ⅻ"));
        assert!(!is_alphabetic_word("שָׁלוֹם"));
        assert!(!is_alphabetic_word("हिन्दी"));
        // Plain lowercasing turns İ into i followed by U+0307.
        assert!(!is_alphabetic_word(&"İstanbul".to_lowercase()));
        assert!(is_alphabetic_word("istanbul"));
        assert!(is_alphabetic_word("שלום"));
        assert!(is_alphabetic_word("ǅ"));
        assert!(is_alphabetic_word("ʼ"));
    }

    #[test]
    fn test_default_threshold_is_strict() {
        let filter = FrequencyFilter::default();
        assert!(filter.passes("kalem", 5));
        assert!(filter.passes("kalem", 2));
        assert!(!filter.passes("ab", 1));
        assert!(!filter.passes("ab", 0));
        assert!(!filter.passes("ab", -4));
    }

    #[test]
    fn test_rejection_reasons() {
        let filter = FrequencyFilter::default();
        assert_eq!(filter.check("abc1", 10), Err(Rejection::NotAlphabetic));
        assert_eq!(filter.check("abc", 1), Err(Rejection::BelowMinFrequency));
        // The alphabetic check wins when both fail.
        assert_eq!(filter.check("123", 1), Err(Rejection::NotAlphabetic));
        assert_eq!(filter.check("abc", 2), Ok(()));
    }

    #[test]
    fn test_custom_threshold() {
        let filter = FrequencyFilter::new(FrequencyFilterConfig { min_frequency: 10 });
        assert_eq!(filter.min_frequency(), 10);
        assert!(!filter.passes("kalem", 10));
        assert!(filter.passes("kalem", 11));
    }
}
