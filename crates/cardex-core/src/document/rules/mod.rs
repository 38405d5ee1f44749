//! Rule-based field extractors for identity cards.

pub mod address;
pub mod cascade;
pub mod dates;
pub mod designation;
pub mod gender;
pub mod identifiers;
pub mod names;
pub mod organization;
pub mod patterns;

pub use cascade::{Cascade, FieldContext, Rule, RuleFn};
pub use dates::{normalize_date, DateExtractor, DateStyle};
pub use gender::GenderExtractor;
pub use identifiers::{IdNumberExtractor, IdNumberKind};

/// Trait for pattern extractors that work on the joined text blob.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted (possibly normalized) value.
    pub value: T,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Trailing segment after the last separator match, trimmed.
///
/// Returns `None` when the line holds no separator at all.
pub(crate) fn trailing_segment<'l>(line: &'l str, separator: &regex::Regex) -> Option<&'l str> {
    separator
        .find_iter(line)
        .last()
        .map(|m| line[m.end()..].trim())
}

/// Whether the line contains any ASCII digit.
pub(crate) fn has_digit(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit())
}

/// Python-style uppercase test: at least one cased letter and no lowercase ones.
pub(crate) fn is_all_upper(line: &str) -> bool {
    line.chars().any(|c| c.is_alphabetic()) && !line.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use patterns::{ID_SEPARATOR, INLINE_SEPARATOR};

    #[test]
    fn test_trailing_segment() {
        assert_eq!(trailing_segment("Name: Asha Devi", &INLINE_SEPARATOR), Some("Asha Devi"));
        assert_eq!(trailing_segment("Name:", &INLINE_SEPARATOR), Some(""));
        assert_eq!(trailing_segment("Name", &INLINE_SEPARATOR), None);
        assert_eq!(trailing_segment("Reg. No: 2113", &ID_SEPARATOR), Some("2113"));
    }

    #[test]
    fn test_is_all_upper() {
        assert!(is_all_upper("RAJALAKSHMI ENGINEERING COLLEGE"));
        assert!(is_all_upper("B.TECH - IT"));
        assert!(!is_all_upper("Priya S"));
        assert!(!is_all_upper("12345"));
    }
}
