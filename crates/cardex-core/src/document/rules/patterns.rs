//! Common regex patterns for identity-card extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Normalization
    pub static ref NON_PRINTABLE: Regex = Regex::new(r"[^\x20-\x7E]+").unwrap();

    pub static ref NUMBERED_INSTRUCTION: Regex = Regex::new(r"^\d+[.)]").unwrap();

    // National ID number (12 digits in groups of four, on one line)
    pub static ref NATIONAL_ID_NUMBER: Regex = Regex::new(
        r"\b\d{4}[^\S\n]\d{4}[^\S\n]\d{4}\b"
    ).unwrap();

    // Voter card EPIC number
    pub static ref VOTER_ID_NUMBER: Regex = Regex::new(
        r"[A-Z]{3}[0-9]{7}|[A-Z]{2}[0-9]{8}"
    ).unwrap();

    // Dates
    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"\b\d{2}[-./]\d{2}[-./]\d{4}\b"
    ).unwrap();

    pub static ref CARD_DATE: Regex = Regex::new(
        r"(?i)\b\d{1,2}[-./ ]+(?:[0-9]{2}|Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[-./ ]+\d{4}\b"
    ).unwrap();

    pub static ref DATE_SEPARATORS: Regex = Regex::new(r"[-./ ]+").unwrap();

    pub static ref AGE_LABEL: Regex = Regex::new(r"(?i)\bAge\b").unwrap();

    // Gender
    pub static ref MALE: Regex = Regex::new(r"(?i)\bMALE\b").unwrap();

    pub static ref FEMALE: Regex = Regex::new(r"(?i)\bFEMALE\b").unwrap();

    pub static ref TRANSGENDER: Regex = Regex::new(r"(?i)\bTRANSGENDER\b").unwrap();

    // Address
    pub static ref POSTAL_CODE: Regex = Regex::new(r"\b\d{6}\b").unwrap();

    pub static ref ADDRESS_LABEL: Regex = Regex::new(r"(?i)ADDRESS\s*[:\-]?\s*(.*)$").unwrap();

    // Label/value separators
    pub static ref INLINE_SEPARATOR: Regex = Regex::new(r"[:\-]").unwrap();

    pub static ref ID_SEPARATOR: Regex = Regex::new(r"[:\-.]").unwrap();

    // Relation names on voter cards
    pub static ref RELATION_NAME: Regex = Regex::new(
        r"(?i)(?:Father|Husband)'?s? Name\s*[:\-]?\s*([A-Za-z .]+)"
    ).unwrap();

    pub static ref RELATION_LABEL: Regex = Regex::new(
        r"(?i)^(?:Father|Husband)'?s?(?: Name)?\s*[:\-]?\s*$"
    ).unwrap();

    // Organization cards
    pub static ref TRANSFER_CODE: Regex = Regex::new(r"\bTC-[0-9]+\b").unwrap();

    pub static ref DESIGNATION_LABEL: Regex = Regex::new(
        r"(?i)DESIGNATION\s*[:\-]?\s*(.*)$"
    ).unwrap();

    pub static ref CLASS_LABEL: Regex = Regex::new(r"(?i)CLASS\s*[:\-]*").unwrap();
}
