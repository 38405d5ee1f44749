//! Gender keyword matching.

use regex::Regex;

use super::cascade::FieldContext;
use super::patterns::{FEMALE, MALE, TRANSGENDER};
use super::{ExtractionMatch, FieldExtractor};

/// Whole-word, case-insensitive gender keywords in priority order.
///
/// When more than one keyword occurs, the earlier entry wins regardless of
/// position in the text.
pub struct GenderExtractor {
    keywords: Vec<(&'static Regex, &'static str)>,
}

impl GenderExtractor {
    pub fn new() -> Self {
        Self {
            keywords: vec![
                (&*MALE, "Male"),
                (&*FEMALE, "Female"),
                (&*TRANSGENDER, "Transgender"),
            ],
        }
    }
}

impl Default for GenderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GenderExtractor {
    type Output = ExtractionMatch<&'static str>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.keywords
            .iter()
            .filter_map(|(pattern, label)| {
                pattern.find(text).map(|m| {
                    ExtractionMatch::new(*label, m.as_str()).with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Highest-priority gender keyword anywhere in the text.
pub fn keyword(ctx: &FieldContext<'_>) -> Option<String> {
    GenderExtractor::new()
        .extract(&ctx.text)
        .map(|m| m.value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let extractor = GenderExtractor::new();
        assert_eq!(extractor.extract("Sex: male").unwrap().value, "Male");
        assert_eq!(extractor.extract("FEMALE").unwrap().value, "Female");
        assert!(extractor.extract("Maleficent").is_none());
    }

    #[test]
    fn test_male_wins_tie() {
        let extractor = GenderExtractor::new();
        let result = extractor.extract("FEMALE\nMALE").unwrap();
        assert_eq!(result.value, "Male");
        assert_eq!(result.position, Some((7, 11)));
    }
}
