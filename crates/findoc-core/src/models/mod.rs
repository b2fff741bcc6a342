//! Data models for invoices, bank statements and configuration.

pub mod config;
pub mod invoice;
pub mod statement;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a parsed document, as surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsingStatus {
    /// Parsing completed and a record is available.
    Parsed,
    /// Parsing failed at the format or backend level.
    Error,
    /// Parsing is still in flight (background processing).
    Processing,
}
