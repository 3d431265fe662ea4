//! Word normalization applied before filtering
//!
//! Plain Unicode lowercasing maps `I` to `i` and `İ` to `i` followed by a
//! combining dot, which breaks Turkish words such as `İSTANBUL` and `ISPARTA`.
//! [`CaseMode::Turkish`] applies the Turkish dotted/dotless pairs instead.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Lowercasing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Leave case untouched
    Preserve,
    /// Default Unicode lowercase mapping
    #[default]
    Unicode,
    /// Turkish mapping: `I` → `ı`, `İ` → `i`, everything else as Unicode
    Turkish,
}

/// Text normalization configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNormalizer {
    /// Lowercasing rules
    #[serde(default)]
    pub case: CaseMode,
    /// Apply Unicode NFC composition before lowercasing
    #[serde(default)]
    pub unicode_nfc: bool,
}

impl TextNormalizer {
    pub fn new(case: CaseMode, unicode_nfc: bool) -> Self {
        Self { case, unicode_nfc }
    }

    /// Turkish-aware preset: NFC composition plus Turkish casing
    pub fn turkish() -> Self {
        Self {
            case: CaseMode::Turkish,
            unicode_nfc: true,
        }
    }

    /// Normalize a word according to configuration
    pub fn normalize(&self, text: &str) -> String {
        let mut buffer = String::with_capacity(text.len());
        self.normalize_into(text, &mut buffer);
        buffer
    }

    /// Normalize into an existing buffer, reusing its allocation
    pub fn normalize_into(&self, text: &str, buffer: &mut String) {
        buffer.clear();

        if self.unicode_nfc {
            let composed: String = text.nfc().collect();
            push_cased(&composed, self.case, buffer);
        } else {
            push_cased(text, self.case, buffer);
        }
    }
}

fn push_cased(text: &str, case: CaseMode, buffer: &mut String) {
    match case {
        CaseMode::Preserve => buffer.push_str(text),
        CaseMode::Unicode => buffer.push_str(&text.to_lowercase()),
        CaseMode::Turkish => {
            for c in text.chars() {
                match c {
                    'I' => buffer.push('ı'),
                    'İ' => buffer.push('i'),
                    _ => buffer.extend(c.to_lowercase()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_lowercase() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("Kalem"), "kalem");
        assert_eq!(normalizer.normalize("ÇİÇEK").chars().next(), Some('ç'));
        assert_eq!(normalizer.normalize("ISPARTA"), "isparta");
    }

    #[test]
    fn test_turkish_lowercase() {
        let normalizer = TextNormalizer::new(CaseMode::Turkish, false);
        assert_eq!(normalizer.normalize("ISPARTA"), "ısparta");
        assert_eq!(normalizer.normalize("İzmir"), "izmir");
        assert_eq!(normalizer.normalize("IŞIK"), "ışık");
        assert_eq!(normalizer.normalize("Ağaç"), "ağaç");
    }

    #[test]
    fn test_preserve_case() {
        let normalizer = TextNormalizer::new(CaseMode::Preserve, false);
        assert_eq!(normalizer.normalize("Kalem"), "Kalem");
    }

    #[test]
    fn test_nfc_composes_accents() {
        let decomposed = "cafe\u{0301}";
        let normalizer = TextNormalizer::new(CaseMode::Unicode, true);
        assert_eq!(normalizer.normalize(decomposed), "café");

        let plain = TextNormalizer::default();
        assert_ne!(plain.normalize(decomposed), "café");
    }

    #[test]
    fn test_turkish_preset() {
        let normalizer = TextNormalizer::turkish();
        assert_eq!(normalizer.normalize("I\u{0307}STANBUL"), "istanbul");
    }

    #[test]
    fn test_normalize_into_reuses_buffer() {
        let normalizer = TextNormalizer::default();
        let mut buffer = String::new();

        normalizer.normalize_into("Kitap", &mut buffer);
        assert_eq!(buffer, "kitap");

        normalizer.normalize_into("DEFTER", &mut buffer);
        assert_eq!(buffer, "defter");
    }

    #[test]
    fn test_normalization_idempotent() {
        let normalizer = TextNormalizer::turkish();
        let once = normalizer.normalize("IĞDIR");
        assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn test_config_deserialization() {
        let normalizer: TextNormalizer =
            serde_json::from_str(r#"{"case": "turkish", "unicode_nfc": true}"#).unwrap();
        assert_eq!(normalizer, TextNormalizer::turkish());

        let defaults: TextNormalizer = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults.case, CaseMode::Unicode);
        assert!(!defaults.unicode_nfc);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(TextNormalizer::turkish().normalize(""), "");
    }
}
