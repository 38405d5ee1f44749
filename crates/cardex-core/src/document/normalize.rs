//! OCR text normalization and noise filtering.

use tracing::trace;

use super::lines::LineSequence;
use super::rules::patterns::{NON_PRINTABLE, NUMBERED_INSTRUCTION};
use crate::models::config::NormalizeConfig;

/// Legal-notice words printed on the back of organization cards.
pub const LEGAL_NOTICE_WORDS: &[&str] = &[
    "LOSS",
    "DAMAGE",
    "PROPERTY",
    "VALID",
    "AUTHORITIES",
    "OFFENCE",
    "INSTRUCTIONS",
    "FOUND",
    "RETURN",
    "DUPLICATION",
];

/// Fragment cleaner with a minimum retained length.
#[derive(Debug, Clone)]
pub struct Normalizer {
    min_len: usize,
    artifacts: Vec<char>,
}

impl Normalizer {
    /// Create a normalizer with default settings.
    pub fn new() -> Self {
        Self::from_config(&NormalizeConfig::default())
    }

    /// Create a normalizer using the lenient (voter/generic) threshold.
    pub fn from_config(config: &NormalizeConfig) -> Self {
        Self {
            min_len: config.min_line_len,
            artifacts: config.artifact_chars.chars().collect(),
        }
    }

    /// Set the minimum cleaned length.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Set the artifact glyphs to strip.
    pub fn with_artifacts(mut self, artifacts: &str) -> Self {
        self.artifacts = artifacts.chars().collect();
        self
    }

    /// Clean a single fragment.
    ///
    /// Runs of characters outside printable ASCII become a single space so
    /// tokens joined across scripts stay separable; artifact glyphs are
    /// removed; the result is trimmed.
    pub fn clean(&self, raw: &str) -> String {
        let replaced = NON_PRINTABLE.replace_all(raw, " ");
        let stripped: String = replaced
            .chars()
            .filter(|c| !self.artifacts.contains(c))
            .collect();
        stripped.trim().to_string()
    }

    /// Clean every fragment and drop the ones below the minimum length.
    pub fn normalize<S: AsRef<str>>(&self, raw: &[S]) -> LineSequence {
        let lines: Vec<String> = raw
            .iter()
            .map(|fragment| self.clean(fragment.as_ref()))
            .filter(|line| line.chars().count() >= self.min_len.max(1))
            .collect();

        trace!(
            "Normalized {} fragments into {} lines",
            raw.len(),
            lines.len()
        );

        LineSequence::new(lines)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a normalized line is boilerplate on an organization card:
/// numbered instructions or legal-notice text.
pub fn is_card_noise(line: &str) -> bool {
    if NUMBERED_INSTRUCTION.is_match(line) {
        return true;
    }
    let upper = line.to_uppercase();
    LEGAL_NOTICE_WORDS.iter().any(|w| upper.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_non_ascii_and_pipes() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.clean("  नाम Rohit | Kumar "), "Rohit  Kumar");
        assert_eq!(normalizer.clean("भारत सरकारGOVERNMENT"), "GOVERNMENT");
        assert_eq!(normalizer.clean("Asha\u{00a0}Devi"), "Asha Devi");
    }

    #[test]
    fn test_short_fragments_dropped() {
        let raw = ["GOVERNMENT OF INDIA", "|", "AB", "x", "Rohit Kumar"];

        let lenient = Normalizer::new().normalize(&raw);
        assert_eq!(lenient.as_slice(), &["GOVERNMENT OF INDIA", "AB", "Rohit Kumar"]);

        let strict = Normalizer::new().with_min_len(3).normalize(&raw);
        assert_eq!(strict.as_slice(), &["GOVERNMENT OF INDIA", "Rohit Kumar"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = [
            " ELECTION | COMMISSION ",
            "नाम: Asha Devi",
            "पिता",
            "ABC1234567",
            "\tDOB 01/02/1990\t",
        ];
        let normalizer = Normalizer::new();
        let once = normalizer.normalize(&raw);
        let twice = normalizer.normalize(once.as_slice());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_order_preserved() {
        let raw = ["c line", "-", "a line", "b line"];
        let lines = Normalizer::new().normalize(&raw);
        assert_eq!(lines.as_slice(), &["c line", "a line", "b line"]);
    }

    #[test]
    fn test_card_noise() {
        assert!(is_card_noise("1. This card is not transferable"));
        assert!(is_card_noise("3) Report loss immediately"));
        assert!(is_card_noise("If found please return to"));
        assert!(!is_card_noise("Priya S"));
        assert!(!is_card_noise("Reg No: 12345"));
    }
}
