//! Error types for the findoc-core library.

use thiserror::Error;

/// Main error type for the findoc library.
#[derive(Error, Debug)]
pub enum FindocError {
    /// Text extraction error.
    #[error("text error: {0}")]
    Text(#[from] TextError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// An uploaded file exceeds the configured size limit.
    #[error("file size {size} exceeds maximum allowed size of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning file bytes into text.
///
/// These are the only errors fatal to a document parse.
#[derive(Error, Debug)]
pub enum TextError {
    /// The declared extension is not one the pipeline recognizes.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Every extraction backend for the format failed.
    #[error("text extraction failed: {0}")]
    BackendFailure(String),
}

/// Errors raised by field-level validation.
///
/// Under the default best-effort policy these never surface; the offending
/// field is dropped instead. The strict policy returns the first one.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A field failed coercion into its canonical shape.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Result type for the findoc library.
pub type Result<T> = std::result::Result<T, FindocError>;
