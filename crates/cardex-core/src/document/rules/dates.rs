//! Date-of-birth extraction.

use super::cascade::FieldContext;
use super::patterns::{AGE_LABEL, CARD_DATE, DATE_SEPARATORS, NUMERIC_DATE};
use super::{ExtractionMatch, FieldExtractor};

/// Printed date layouts recognized on cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `dd-mm-yyyy` with `-`, `.` or `/`.
    Numeric,
    /// Day, numeric or named month, four-digit year, with loose separators.
    Card,
}

/// Date field extractor.
pub struct DateExtractor {
    style: DateStyle,
}

impl DateExtractor {
    pub fn new(style: DateStyle) -> Self {
        Self { style }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new(DateStyle::Numeric)
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let pattern = match self.style {
            DateStyle::Numeric => &*NUMERIC_DATE,
            DateStyle::Card => &*CARD_DATE,
        };

        pattern
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(normalize_date(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Collapse every separator run to a single `-`. Digit groups are not validated.
pub fn normalize_date(date: &str) -> String {
    DATE_SEPARATORS.replace_all(date.trim(), "-").into_owned()
}

/// First `dd-mm-yyyy` style date anywhere in the text.
pub fn numeric_date(ctx: &FieldContext<'_>) -> Option<String> {
    DateExtractor::new(DateStyle::Numeric)
        .extract(&ctx.text)
        .map(|m| m.value)
}

/// First loosely formatted date (month names allowed) anywhere in the text.
pub fn card_date(ctx: &FieldContext<'_>) -> Option<String> {
    DateExtractor::new(DateStyle::Card)
        .extract(&ctx.text)
        .map(|m| m.value)
}

/// Voter cards issued to older electors print an age instead of a date.
pub fn age_line(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .find(|l| AGE_LABEL.is_match(l) && l.chars().any(|c| c.is_ascii_digit()))
        .map(|l| l.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::lines::LineSequence;
    use crate::models::config::ExtractionConfig;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_date("01/02/1990"), "01-02-1990");
        assert_eq!(normalize_date("01.02.1990"), "01-02-1990");
        assert_eq!(normalize_date("14 Mar 2009"), "14-Mar-2009");
        assert_eq!(normalize_date("14 - Mar - 2009"), "14-Mar-2009");
    }

    #[test]
    fn test_ranges_not_validated() {
        let extractor = DateExtractor::new(DateStyle::Numeric);
        let result = extractor.extract("DOB: 45/13/1990").unwrap();
        assert_eq!(result.value, "45-13-1990");
        assert_eq!(result.source, "45/13/1990");
        assert_eq!(result.position, Some((5, 15)));
    }

    #[test]
    fn test_card_style_dates() {
        let extractor = DateExtractor::new(DateStyle::Card);
        let all = extractor.extract_all("DOB 5 Jun 2001\nValid 01/06/2030");
        let values: Vec<_> = all.into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec!["5-Jun-2001", "01-06-2030"]);
    }

    #[test]
    fn test_age_fallback() {
        let lines: LineSequence = ["Name: Ram", "Age: 45"].into_iter().collect();
        let config = ExtractionConfig::default();
        let ctx = FieldContext::new(&lines, &config);
        assert_eq!(numeric_date(&ctx), None);
        assert_eq!(age_line(&ctx), Some("Age: 45".to_string()));
    }
}
