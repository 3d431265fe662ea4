//! Allowed-character sets for the alphabet reviser
//!
//! A word survives the reviser only if every one of its characters is in
//! the base alphabet or in the extended set of accented Latin letters.
//! Both sets are configuration, so other alphabets can be plugged in
//! without touching the reviser.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lowercase letters of the Turkish alphabet
pub const TR_ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyz";

/// Accented Latin letters accepted on top of the base alphabet (61 letters)
pub const EXTENDED_ACCENTED: &str =
    "àáâãäåèéêëìíîïðñòóôõöøùúûüýÿāăćčđēĕěğġħĩīıĸĺļľńőřśşšťũūűżžƒơǻ";

/// Alphabet configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphabetConfig {
    /// Base letters of the target language
    pub base: String,
    /// Additional accented letters
    pub extended: String,
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        Self::turkish()
    }
}

impl AlphabetConfig {
    /// Turkish base alphabet plus the accented Latin set
    pub fn turkish() -> Self {
        Self {
            base: TR_ALPHABET.to_string(),
            extended: EXTENDED_ACCENTED.to_string(),
        }
    }

    /// Turkish base alphabet only
    pub fn turkish_strict() -> Self {
        Self {
            base: TR_ALPHABET.to_string(),
            extended: String::new(),
        }
    }
}

/// Membership test over the union of the base and extended sets
#[derive(Debug, Clone)]
pub struct Alphabet {
    base: HashSet<char>,
    extended: HashSet<char>,
}

fn is_reserved(c: char) -> bool {
    c.is_whitespace() || c.is_control() || c == ',' || c == '"'
}

impl Alphabet {
    /// Build an alphabet from configuration
    pub fn new(config: &AlphabetConfig) -> Result<Self> {
        let base: HashSet<char> = config.base.chars().collect();
        let extended: HashSet<char> = config.extended.chars().collect();

        if base.is_empty() && extended.is_empty() {
            return Err(Error::InvalidConfig(
                "Alphabet must contain at least one character".to_string(),
            ));
        }

        // Accepted words are written unquoted as `word,count` lines.
        if let Some(c) = base.iter().chain(extended.iter()).find(|&&c| is_reserved(c)) {
            return Err(Error::InvalidConfig(format!(
                "Alphabet may not contain whitespace, control characters, ',' or '\"' (found {:?})",
                c
            )));
        }

        Ok(Self { base, extended })
    }

    /// Turkish alphabet with the accented extension
    pub fn turkish() -> Self {
        Self {
            base: TR_ALPHABET.chars().collect(),
            extended: EXTENDED_ACCENTED.chars().collect(),
        }
    }

    /// Whether a single character is allowed
    pub fn allows(&self, c: char) -> bool {
        self.base.contains(&c) || self.extended.contains(&c)
    }

    /// First character of `word` outside the alphabet, if any
    pub fn first_disallowed(&self, word: &str) -> Option<char> {
        word.chars().find(|&c| !self.allows(c))
    }

    /// Whether every character of `word` is allowed.
    ///
    /// The empty word is trivially accepted.
    pub fn accepts(&self, word: &str) -> bool {
        self.first_disallowed(word).is_none()
    }

    /// Number of distinct allowed characters
    pub fn len(&self) -> usize {
        self.base.union(&self.extended).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::turkish()
    }
}
