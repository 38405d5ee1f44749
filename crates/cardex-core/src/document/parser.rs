//! Record assembly: normalize, classify, run the template cascades.

use std::time::Instant;

use tracing::{debug, info};

use super::classify::{DocumentClassifier, DocumentFamily};
use super::lines::LineSequence;
use super::normalize::Normalizer;
use super::templates::{extract_record, template_lines};
use super::Result;
use crate::error::ExtractionError;
use crate::models::config::CardexConfig;
use crate::models::record::{DocumentKind, ExtractedRecord};

/// Result of a document extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ExtractedRecord,
    /// Template the record was built with.
    pub kind: DocumentKind,
    /// Normalized lines the classifier saw.
    pub lines: LineSequence,
    /// Fields no rule could fill.
    pub missing_fields: Vec<&'static str>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for identity document parsing.
pub trait DocumentParser {
    /// Parse a document from OCR fragments.
    fn parse(&self, fragments: &[String]) -> Result<ExtractionResult>;
}

/// Rule-based identity card parser.
#[derive(Debug, Clone, Default)]
pub struct CardParser {
    config: CardexConfig,
    family: DocumentFamily,
}

impl CardParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given configuration.
    pub fn with_config(mut self, config: CardexConfig) -> Self {
        self.config = config;
        self
    }

    /// Restrict classification to a document family.
    pub fn with_family(mut self, family: DocumentFamily) -> Self {
        self.family = family;
        self
    }

    pub fn config(&self) -> &CardexConfig {
        &self.config
    }

    pub fn family(&self) -> DocumentFamily {
        self.family
    }

    /// Parse a front side and an optional back side, front lines first.
    pub fn parse_sides<S: AsRef<str>>(&self, front: &[S], back: Option<&[S]>) -> Result<ExtractionResult> {
        let fragments: Vec<&str> = front
            .iter()
            .chain(back.unwrap_or_default())
            .map(|fragment| fragment.as_ref())
            .collect();
        self.parse_fragments(&fragments)
    }

    /// Parse any slice of fragments.
    pub fn parse_fragments<S: AsRef<str>>(&self, fragments: &[S]) -> Result<ExtractionResult> {
        let start = Instant::now();

        info!("Parsing identity document from {} OCR fragments", fragments.len());

        let lines = Normalizer::from_config(&self.config.normalize).normalize(fragments);
        if lines.is_empty() {
            debug!("No fragment survived normalization");
            return Err(ExtractionError::NoInputText);
        }

        let kind = DocumentClassifier::new()
            .with_family(self.family)
            .classify(&lines);

        let prepared = template_lines(kind, &lines, &self.config);
        let record = extract_record(kind, &prepared, &self.config.extraction);

        let missing_fields = record.missing_fields();
        if !missing_fields.is_empty() {
            debug!("{} fields not found: {}", kind, missing_fields.join(", "));
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extracted {} with {} of {} fields in {}ms",
            kind,
            record.fields().len() - missing_fields.len(),
            record.fields().len(),
            processing_time_ms
        );

        Ok(ExtractionResult {
            record,
            kind,
            lines,
            missing_fields,
            processing_time_ms,
        })
    }
}

impl DocumentParser for CardParser {
    fn parse(&self, fragments: &[String]) -> Result<ExtractionResult> {
        self.parse_fragments(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> Result<ExtractionResult> {
        CardParser::new().parse_fragments(lines)
    }

    #[test]
    fn test_national_card() {
        let result = parse(&[
            "GOVERNMENT OF INDIA",
            "Rohit Kumar",
            "DOB: 01-01-1990",
            "1234 5678 9012",
            "MALE",
        ])
        .unwrap();

        assert_eq!(result.kind, DocumentKind::NationalId);
        let record = &result.record;
        assert_eq!(record.get("id_number"), Some("1234 5678 9012"));
        assert_eq!(record.get("dob"), Some("01-01-1990"));
        assert_eq!(record.get("gender"), Some("Male"));
        assert_eq!(record.get("full_name"), Some("Rohit Kumar"));
        assert_eq!(result.missing_fields, vec!["address"]);
    }

    #[test]
    fn test_national_number_not_joined_with_year_above() {
        let result = parse(&["GOVERNMENT OF INDIA", "Meera Nair", "Year of Birth 1988", "4321 8765 2109"]).unwrap();

        assert_eq!(result.kind, DocumentKind::NationalId);
        assert_eq!(result.record.get("id_number"), Some("4321 8765 2109"));
    }

    #[test]
    fn test_voter_card() {
        let result = parse(&[
            "ELECTION COMMISSION OF INDIA",
            "Name: Asha Devi",
            "ABC1234567",
            "FEMALE",
        ])
        .unwrap();

        assert_eq!(result.kind, DocumentKind::VoterId);
        let record = &result.record;
        assert_eq!(record.get("voter_id"), Some("ABC1234567"));
        assert_eq!(record.get("name"), Some("Asha Devi"));
        assert_eq!(record.get("gender"), Some("Female"));
        assert_eq!(record.get("father_name"), None);
    }

    #[test]
    fn test_no_text() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err, ExtractionError::NoInputText);

        let err = parse(&["|", " ", "\u{0928}"]).unwrap_err();
        assert_eq!(err, ExtractionError::NoInputText);
    }

    #[test]
    fn test_student_name_below_registration() {
        let result = parse(&["RAJALAKSHMI ENGINEERING COLLEGE", "Reg No: 12345", "Priya S"]).unwrap();

        assert_eq!(result.kind, DocumentKind::StudentId);
        let record = &result.record;
        assert_eq!(record.get("name"), Some("Priya S"));
        assert_eq!(record.get("org_name"), Some("RAJALAKSHMI ENGINEERING COLLEGE"));
        assert_eq!(record.get("id_number"), Some("12345"));
    }

    #[test]
    fn test_address_stops_at_phone() {
        let result = parse(&["Address", "12 Main St", "City 600001", "Phone: 9876543210"]).unwrap();

        assert_eq!(result.kind, DocumentKind::GenericId);
        assert_eq!(result.record.get("address"), Some("12 Main St, City 600001"));
    }

    #[test]
    fn test_employee_card() {
        let result = parse(&[
            "TECHCORP SYSTEMS",
            "IDENTITY CARD",
            "JOHN DOE",
            "EMP ID: 4521",
            "Designation: Manager",
            "DOB: 12 Mar 1988",
            "1. This card is not transferable",
            "If found please return to the office",
        ])
        .unwrap();

        assert_eq!(result.kind, DocumentKind::EmployeeId);
        let record = &result.record;
        assert_eq!(record.get("org_name"), Some("TECHCORP SYSTEMS"));
        assert_eq!(record.get("name"), Some("JOHN DOE"));
        assert_eq!(record.get("designation_or_class"), Some("Manager"));
        assert_eq!(record.get("id_number"), Some("4521"));
        assert_eq!(record.get("dob"), Some("12-Mar-1988"));
    }

    #[test]
    fn test_front_then_back() {
        let front = ["ELECTION COMMISSION OF INDIA", "Name: Asha Devi"];
        let back = ["Address", "12 Lake Road", "Ward 4", "Chennai", "Tamil Nadu"];
        let result = CardParser::new().parse_sides(&front, Some(&back[..])).unwrap();

        assert_eq!(
            result.record.get("address"),
            Some("12 Lake Road, Ward 4, Chennai")
        );
    }

    #[test]
    fn test_back_only() {
        let result = CardParser::new()
            .parse_sides::<&str>(&[], Some(&["ELECTION COMMISSION", "FEMALE"][..]))
            .unwrap();
        assert_eq!(result.kind, DocumentKind::VoterId);
        assert_eq!(result.record.get("gender"), Some("Female"));
    }

    #[test]
    fn test_all_null_record_is_valid() {
        let result = parse(&["zz", "qq"]).unwrap();
        assert_eq!(result.kind, DocumentKind::GenericId);
        assert!(result.record.fields().iter().all(|(_, v)| v.is_none()));
        assert_eq!(result.missing_fields.len(), 6);
    }

    #[test]
    fn test_deterministic() {
        let lines = [
            "GREEN VALLEY SCHOOL",
            "ARJUN MEHTA",
            "Roll No: 42",
            "Class: IX-B",
            "Address: 4 Hill View",
            "Pune 411001",
        ];
        let first = parse(&lines).unwrap().record;
        let second = parse(&lines).unwrap().record;
        assert_eq!(first, second);
        assert_eq!(first.get("address"), Some("4 Hill View, Pune 411001"));
    }

    #[test]
    fn test_family_hint() {
        let lines = ["Name: Meera Nair", "1234 5678 9012", "FEMALE"];

        let general = CardParser::new().with_family(DocumentFamily::General);
        assert_eq!(general.parse_fragments(&lines).unwrap().kind, DocumentKind::GenericId);

        let national = CardParser::new().with_family(DocumentFamily::National);
        let result = national.parse_fragments(&lines).unwrap();
        assert_eq!(result.kind, DocumentKind::NationalId);
        assert_eq!(result.record.get("full_name"), Some("Meera Nair"));
    }

    #[test]
    fn test_lines_are_normalized() {
        let result = parse(&["  नाम Rohit | Kumar ", "a", "1234 5678 9012"]).unwrap();
        assert_eq!(result.lines.as_slice(), &["Rohit  Kumar", "1234 5678 9012"]);
    }
}
