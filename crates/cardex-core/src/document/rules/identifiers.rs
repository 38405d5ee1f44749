//! Identity number extraction: national ID, voter EPIC, organization codes.

use regex::Regex;

use super::cascade::FieldContext;
use super::patterns::{ID_SEPARATOR, NATIONAL_ID_NUMBER, TRANSFER_CODE, VOTER_ID_NUMBER};
use super::{has_digit, trailing_segment, ExtractionMatch, FieldExtractor};

/// Label words that precede an organization card number.
pub const CARD_ID_ANCHORS: &[&str] = &["REG", "ROLL", "ID NO", "CODE", "EMP", "TC-"];

/// Number shapes with a fixed syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdNumberKind {
    /// Twelve digits grouped `dddd dddd dddd`.
    National,
    /// Three letters and seven digits, or two letters and eight digits.
    Voter,
    /// Internal transfer-certificate code `TC-<digits>`.
    TransferCode,
}

impl IdNumberKind {
    fn pattern(&self) -> &'static Regex {
        match self {
            IdNumberKind::National => &NATIONAL_ID_NUMBER,
            IdNumberKind::Voter => &VOTER_ID_NUMBER,
            IdNumberKind::TransferCode => &TRANSFER_CODE,
        }
    }
}

/// Identity number extractor for one number shape.
pub struct IdNumberExtractor {
    kind: IdNumberKind,
}

impl IdNumberExtractor {
    pub fn new(kind: IdNumberKind) -> Self {
        Self { kind }
    }
}

impl FieldExtractor for IdNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.kind.pattern().find(text).map(|m| {
            ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                .with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.kind
            .pattern()
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Whether the text carries a national ID number.
pub fn contains_national_number(text: &str) -> bool {
    NATIONAL_ID_NUMBER.is_match(text)
}

pub fn national_number(ctx: &FieldContext<'_>) -> Option<String> {
    IdNumberExtractor::new(IdNumberKind::National)
        .extract(&ctx.text)
        .map(|m| m.value)
}

pub fn voter_number(ctx: &FieldContext<'_>) -> Option<String> {
    IdNumberExtractor::new(IdNumberKind::Voter)
        .extract(&ctx.text)
        .map(|m| m.value)
}

pub fn transfer_code(ctx: &FieldContext<'_>) -> Option<String> {
    IdNumberExtractor::new(IdNumberKind::TransferCode)
        .extract(&ctx.text)
        .map(|m| m.value)
}

/// Value on or directly after a registration/roll/employee number label.
///
/// Tries each anchor line in order: the segment after the last `:`/`-`/`.`
/// when it holds a digit, otherwise the next line when it holds a digit.
pub fn labeled_card_number(ctx: &FieldContext<'_>) -> Option<String> {
    let anchors = ctx
        .lines
        .anchors(|upper| CARD_ID_ANCHORS.iter().any(|k| upper.contains(k)));

    for index in anchors {
        let line = ctx.lines.get(index)?;

        if let Some(value) = trailing_segment(line, &ID_SEPARATOR).filter(|v| has_digit(v)) {
            return Some(value.to_string());
        }

        if let Some(next) = ctx.lines.get(index + 1).filter(|l| has_digit(l)) {
            return Some(next.trim().to_string());
        }
    }

    None
}
