//! Identity document classification and field extraction.

pub mod classify;
mod input;
pub mod lines;
pub mod normalize;
mod parser;
pub mod rules;
pub mod templates;

pub use classify::{classify, DocumentClassifier, DocumentFamily};
pub use input::{extract_document, extract_with, OcrOutput};
pub use lines::{AnchorScan, Direction, LineSequence, ScanStep};
pub use normalize::{is_card_noise, Normalizer};
pub use parser::{CardParser, DocumentParser, ExtractionResult};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
