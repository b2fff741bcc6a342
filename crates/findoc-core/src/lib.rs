//! Core library for findoc financial document processing.
//!
//! This crate provides:
//! - Text extraction from PDF, CSV and spreadsheet files
//! - A two-stage extraction pipeline (generative-model service with a
//!   deterministic regex fallback)
//! - Field normalization into canonical invoice / transaction records
//! - A specialized parser for CSV bank statement exports

pub mod dates;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod statement;
pub mod text;

pub use error::{ExtractionError, FindocError, Result, TextError};
pub use extract::{
    ContentExtractor, DocumentKind, ExtractionOrchestrator, ExtractionOutcome, ExtractionSource,
    FieldPolicy, InvoiceExtractor, StatementExtractor, normalize_invoice, normalize_transaction,
};
pub use models::ParsingStatus;
pub use models::config::{ExtractionConfig, FindocConfig, ServiceConfig, UploadLimits};
pub use models::invoice::InvoiceRecord;
pub use models::statement::{PaymentMode, StatementMetadata, TransactionRecord};
pub use pipeline::{DocumentPipeline, ExtractedDocument, validate_upload};
pub use statement::{StatementParse, parse_statement};
pub use text::FileKind;

/// Re-export service types consumed through the pipeline API.
pub use findoc_extract::{FieldMap, ServiceError, StructuredExtractionService};
