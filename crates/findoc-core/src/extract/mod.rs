//! The two-stage extraction pipeline: service call, then regex fallback.

pub mod normalize;
mod orchestrator;
pub mod rules;

pub use normalize::{normalize_invoice, normalize_transaction};
pub use orchestrator::{ExtractionOrchestrator, ExtractionOutcome, ExtractionSource};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which document family a text blob is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    Statement,
}

/// What to do when an extracted field fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Drop the field and keep the rest of the record (default).
    #[default]
    BestEffort,
    /// Surface the first validation failure instead of dropping.
    Strict,
}

/// Capability interface for document-family content parsers.
///
/// Variants share one orchestrator (and thus one service client) and differ
/// only in the schema and fallback battery they select.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Parse raw text into a field map. Never fails; an empty map is the
    /// degraded-but-valid outcome.
    async fn parse(&self, text: &str) -> ExtractionOutcome;
}

/// Content parser for invoice documents.
pub struct InvoiceExtractor {
    orchestrator: Arc<ExtractionOrchestrator>,
}

impl InvoiceExtractor {
    pub fn new(orchestrator: Arc<ExtractionOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl ContentExtractor for InvoiceExtractor {
    async fn parse(&self, text: &str) -> ExtractionOutcome {
        self.orchestrator.extract(text, DocumentKind::Invoice).await
    }
}

/// Content parser for bank statement documents.
pub struct StatementExtractor {
    orchestrator: Arc<ExtractionOrchestrator>,
}

impl StatementExtractor {
    pub fn new(orchestrator: Arc<ExtractionOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl ContentExtractor for StatementExtractor {
    async fn parse(&self, text: &str) -> ExtractionOutcome {
        self.orchestrator.extract(text, DocumentKind::Statement).await
    }
}
