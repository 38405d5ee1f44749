//! OCR output accepted per card side, and the top-level extraction entry point.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::classify::DocumentFamily;
use super::parser::CardParser;
use crate::error::ExtractionError;
use crate::models::config::CardexConfig;
use crate::models::record::ExtractionOutcome;

/// What the OCR collaborator produced for one side of a card.
///
/// Deserializes from either a JSON array of strings or an `{"error": "..."}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OcrOutput {
    Lines(Vec<String>),
    Failed { error: String },
}

impl OcrOutput {
    /// Parse the JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// One fragment per line of plain text.
    pub fn from_text(text: &str) -> Self {
        OcrOutput::Lines(text.lines().map(str::to_string).collect())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        OcrOutput::Failed {
            error: message.into(),
        }
    }

    pub fn lines(&self) -> Option<&[String]> {
        match self {
            OcrOutput::Lines(lines) => Some(lines),
            OcrOutput::Failed { .. } => None,
        }
    }
}

impl From<Vec<String>> for OcrOutput {
    fn from(lines: Vec<String>) -> Self {
        OcrOutput::Lines(lines)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "extraction failed unexpectedly".to_string()
    }
}

/// Run the parser on already-recognized sides and always return a serializable outcome.
///
/// Unreadable sides are skipped and the readable ones are parsed, front first.
/// The OCR error is passed through only when no side could be read.
pub fn extract_with(parser: &CardParser, front: &OcrOutput, back: Option<&OcrOutput>) -> ExtractionOutcome {
    let mut fragments: Vec<&str> = Vec::new();
    let mut first_failure: Option<&String> = None;
    let mut any_readable = false;

    for (side, output) in [("front", Some(front)), ("back", back)] {
        match output {
            Some(OcrOutput::Lines(lines)) => {
                any_readable = true;
                fragments.extend(lines.iter().map(String::as_str));
            }
            Some(OcrOutput::Failed { error }) => {
                warn!("Skipping unreadable {} side: {}", side, error);
                if first_failure.is_none() {
                    first_failure = Some(error);
                }
            }
            None => {}
        }
    }

    if !any_readable {
        if let Some(error) = first_failure {
            return ExtractionOutcome::error(&ExtractionError::UnreadableSource(error.clone()));
        }
    }

    let run = panic::catch_unwind(AssertUnwindSafe(|| parser.parse_fragments(&fragments)));

    match run {
        Ok(result) => result.map(|r| r.record).into(),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Extraction panicked: {}", message);
            ExtractionOutcome::error(&ExtractionError::UnexpectedFailure(message))
        }
    }
}

/// Extract an identity record from front (and optional back) OCR output.
pub fn extract_document(
    front: &OcrOutput,
    back: Option<&OcrOutput>,
    family: DocumentFamily,
    config: &CardexConfig,
) -> ExtractionOutcome {
    let parser = CardParser::new()
        .with_config(config.clone())
        .with_family(family);
    extract_with(&parser, front, back)
}
