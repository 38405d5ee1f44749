//! Document template selection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lines::LineSequence;
use super::rules::identifiers::contains_national_number;
use crate::models::record::DocumentKind;

/// Election-authority vocabulary found only on voter cards.
const ELECTION_WORDS: &[&str] = &["ELECTION", "ELECTOR"];

/// Employment vocabulary; `TC-` is an internal transfer-certificate code prefix.
const EMPLOYMENT_WORDS: &[&str] = &["EMPLOYEE", "DESIGNATION", "TC-"];

/// Academic vocabulary marking a student card.
const ACADEMIC_WORDS: &[&str] = &[
    "STUDENT",
    "COLLEGE",
    "SCHOOL",
    "UNIVERSITY",
    "INSTITUTE",
    "ACADEMY",
    "REG",
    "ROLL",
    "CLASS",
    "B.TECH",
    "BACHELOR",
];

/// Caller hint choosing which classification rules participate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFamily {
    /// Full cascade: voter, national, employee, student, generic.
    #[default]
    Auto,
    /// National-ID pipeline: always the national template.
    National,
    /// Generic/voter pipeline: the cascade without national-ID detection.
    General,
}

impl std::str::FromStr for DocumentFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(DocumentFamily::Auto),
            "national" | "aadhaar" => Ok(DocumentFamily::National),
            "general" | "generic" => Ok(DocumentFamily::General),
            other => Err(format!("unknown document family: {other}")),
        }
    }
}

/// One classification rule: a vocabulary test and the kind it selects.
struct KindRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    kind: DocumentKind,
}

fn contains_any(upper: &str, words: &[&str]) -> bool {
    words.iter().any(|w| upper.contains(w))
}

const VOTER: KindRule = KindRule {
    name: "election vocabulary",
    matches: |upper| contains_any(upper, ELECTION_WORDS),
    kind: DocumentKind::VoterId,
};

const NATIONAL: KindRule = KindRule {
    name: "grouped 12-digit number",
    matches: contains_national_number,
    kind: DocumentKind::NationalId,
};

const EMPLOYEE: KindRule = KindRule {
    name: "employment vocabulary",
    matches: |upper| contains_any(upper, EMPLOYMENT_WORDS),
    kind: DocumentKind::EmployeeId,
};

const STUDENT: KindRule = KindRule {
    name: "academic vocabulary",
    matches: |upper| contains_any(upper, ACADEMIC_WORDS),
    kind: DocumentKind::StudentId,
};

const AUTO_RULES: &[KindRule] = &[VOTER, NATIONAL, EMPLOYEE, STUDENT];

const GENERAL_RULES: &[KindRule] = &[VOTER, EMPLOYEE, STUDENT];

/// Priority cascade over document vocabulary. First satisfied rule wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentClassifier {
    family: DocumentFamily,
}

impl DocumentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(mut self, family: DocumentFamily) -> Self {
        self.family = family;
        self
    }

    fn rules(&self) -> &'static [KindRule] {
        match self.family {
            DocumentFamily::Auto => AUTO_RULES,
            DocumentFamily::National => &[],
            DocumentFamily::General => GENERAL_RULES,
        }
    }

    /// Select the template for a normalized line sequence.
    pub fn classify(&self, lines: &LineSequence) -> DocumentKind {
        if self.family == DocumentFamily::National {
            debug!("National family requested, skipping classification");
            return DocumentKind::NationalId;
        }

        let upper = lines.upper_text();
        for rule in self.rules() {
            if (rule.matches)(&upper) {
                debug!("Classified as {} ({})", rule.kind, rule.name);
                return rule.kind;
            }
        }

        debug!("No classification rule matched, using generic card");
        DocumentKind::GenericId
    }
}

/// Classify with the full cascade.
pub fn classify(lines: &LineSequence) -> DocumentKind {
    DocumentClassifier::new().classify(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(lines: &[&str]) -> LineSequence {
        lines.iter().copied().collect()
    }

    #[test]
    fn test_voter_beats_national_number() {
        let lines = seq(&["ELECTION COMMISSION OF INDIA", "1234 5678 9012"]);
        assert_eq!(classify(&lines), DocumentKind::VoterId);
    }

    #[test]
    fn test_national_number() {
        let lines = seq(&["GOVERNMENT OF INDIA", "1234 5678 9012"]);
        assert_eq!(classify(&lines), DocumentKind::NationalId);
    }

    #[test]
    fn test_years_on_separate_lines_are_not_a_national_number() {
        let lines = seq(&["CITY GYM", "Member since 2019", "2020 2021 renewal"]);
        assert_eq!(classify(&lines), DocumentKind::GenericId);
    }

    #[test]
    fn test_elector_wording() {
        let lines = seq(&["Elector's Photo Identity Card"]);
        assert_eq!(classify(&lines), DocumentKind::VoterId);
    }

    #[test]
    fn test_employee_and_student() {
        assert_eq!(
            classify(&seq(&["TECHCORP", "Designation: Developer"])),
            DocumentKind::EmployeeId
        );
        assert_eq!(classify(&seq(&["ID: TC-1182"])), DocumentKind::EmployeeId);
        assert_eq!(
            classify(&seq(&["RAJALAKSHMI ENGINEERING COLLEGE", "Reg No: 12345"])),
            DocumentKind::StudentId
        );
        assert_eq!(
            classify(&seq(&["CITY GYM", "Member: Ravi"])),
            DocumentKind::GenericId
        );
    }

    #[test]
    fn test_family_hints() {
        let lines = seq(&["GOVERNMENT OF INDIA", "1234 5678 9012"]);
        let general = DocumentClassifier::new().with_family(DocumentFamily::General);
        assert_eq!(general.classify(&lines), DocumentKind::GenericId);

        let national = DocumentClassifier::new().with_family(DocumentFamily::National);
        assert_eq!(national.classify(&seq(&["ELECTION"])), DocumentKind::NationalId);
    }

    #[test]
    fn test_family_parse() {
        assert_eq!("National".parse::<DocumentFamily>(), Ok(DocumentFamily::National));
        assert_eq!("generic".parse::<DocumentFamily>(), Ok(DocumentFamily::General));
        assert!("passport".parse::<DocumentFamily>().is_err());
    }
}
