//! Error types for the cardex-core library.

use thiserror::Error;

/// Main error type for the cardex library.
#[derive(Error, Debug)]
pub enum CardexError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Terminal outcomes of an extraction run.
///
/// The `Display` text is exactly what ends up in the `error` key of the
/// JSON error object handed to consumers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Nothing usable survived normalization.
    #[error("No text found in images")]
    NoInputText,

    /// The OCR collaborator could not read the source. Passed through unchanged.
    #[error("{0}")]
    UnreadableSource(String),

    /// Something inside the pipeline failed unexpectedly.
    #[error("{0}")]
    UnexpectedFailure(String),
}

/// Result type for the cardex library.
pub type Result<T> = std::result::Result<T, CardexError>;
