//! Error types for the extraction service layer.

use thiserror::Error;

/// Errors that can occur while calling the structured extraction service.
///
/// None of these are fatal to a document parse; the pipeline treats every
/// variant as a fallback trigger.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The HTTP request itself failed (connect, TLS, body).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The call did not complete within the configured deadline.
    #[error("extraction call timed out after {0}s")]
    Timeout(u64),

    /// The response body could not be decoded as the expected JSON payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The decoded payload did not yield any field conforming to the schema.
    #[error("no fields matched schema '{0}'")]
    Schema(String),

    /// No API key was configured for the backend.
    #[error("missing API credentials for {0}")]
    MissingCredentials(String),
}
