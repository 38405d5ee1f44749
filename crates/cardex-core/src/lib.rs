//! Core library for identity card field extraction from OCR text.
//!
//! This crate provides:
//! - OCR fragment normalization and card noise filtering
//! - Document classification (national ID, voter ID, employee/student/generic cards)
//! - Per-field rule cascades with ordered fallbacks
//! - Record models with a flat JSON form and configuration

pub mod document;
pub mod error;
pub mod models;

pub use document::{
    extract_document, CardParser, DocumentFamily, DocumentParser, ExtractionResult, LineSequence,
    OcrOutput,
};
pub use error::{CardexError, ExtractionError, Result};
pub use models::config::CardexConfig;
pub use models::record::{
    CardRecord, DocumentKind, ExtractedRecord, ExtractionOutcome, NationalIdRecord, VoterIdRecord,
};
