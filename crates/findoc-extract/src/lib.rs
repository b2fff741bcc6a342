//! Structured extraction service abstraction for findoc.
//!
//! This crate provides a unified interface for turning raw document text into
//! a loosely-typed field map via a generative-model service:
//! - `StructuredExtractionService` - the capability trait consumed by the
//!   extraction pipeline
//! - `ExtractionSchema` - the field names, kinds and task instruction sent
//!   with every request
//! - `GeminiExtractor` - HTTP backend against the Gemini `generateContent` API

mod error;
mod gemini;
mod schema;

pub use error::ServiceError;
pub use gemini::GeminiExtractor;
pub use schema::{ExtractionSchema, FieldKind, SchemaField, invoice_schema, statement_schema};

use async_trait::async_trait;

/// Loosely-typed mapping from canonical field name to a candidate value.
///
/// Insertion order is preserved (`serde_json` is built with `preserve_order`),
/// so fields come back in schema order.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Result type for extraction service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// A service that extracts structured fields from document text.
///
/// Implementations must be safe for concurrent use across parse invocations;
/// the pipeline shares one instance between documents.
#[async_trait]
pub trait StructuredExtractionService: Send + Sync {
    /// Extract the fields described by `schema` from `text`.
    ///
    /// Returns only fields that conform to the schema; absent fields are
    /// simply missing from the map. Errors here are never fatal to a parse -
    /// the caller falls back to deterministic matchers.
    async fn extract(&self, text: &str, schema: &ExtractionSchema) -> Result<FieldMap>;
}
