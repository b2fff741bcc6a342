//! The document pipeline: upload validation, text extraction and content
//! parsing composed behind one facade.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::{FindocError, Result, TextError};
use crate::extract::{
    ContentExtractor, DocumentKind, ExtractionOrchestrator, FieldPolicy, InvoiceExtractor,
    StatementExtractor, normalize_invoice, normalize_transaction,
};
use crate::models::config::UploadLimits;
use crate::models::invoice::InvoiceRecord;
use crate::models::statement::TransactionRecord;
use crate::text::{self, FileKind};
use findoc_extract::{FieldMap, StructuredExtractionService};

/// Everything a single parse produces, owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    /// The full text content of the file.
    pub raw_text: String,
    /// Extracted fields, prior to normalization.
    pub parsed_fields: FieldMap,
    /// Container format the bytes were read as.
    pub file_kind: FileKind,
}

/// Validate an upload against the configured limits before any parsing.
///
/// Returns the file kind implied by the extension on success.
pub fn validate_upload(filename: &str, size: u64, limits: &UploadLimits) -> Result<FileKind> {
    if size > limits.max_file_size {
        return Err(FindocError::FileTooLarge {
            size,
            limit: limits.max_file_size,
        });
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !limits.allowed_extensions.contains(&extension) {
        return Err(TextError::UnsupportedFormat(extension).into());
    }

    FileKind::from_extension(&extension)
        .ok_or_else(|| TextError::UnsupportedFormat(extension).into())
}

/// Text extraction and content parsing for one document family at a time.
///
/// One pipeline is safe to share across concurrent parse invocations: every
/// call is a self-contained computation over its own inputs.
pub struct DocumentPipeline {
    invoice: InvoiceExtractor,
    statement: StatementExtractor,
    policy: FieldPolicy,
    default_currency: Option<String>,
}

impl DocumentPipeline {
    /// A pipeline with no extraction service: every parse goes straight to
    /// the fallback matchers.
    pub fn new(policy: FieldPolicy) -> Self {
        Self::build(Arc::new(ExtractionOrchestrator::new()), policy)
    }

    /// A pipeline with a generative extraction service as the primary stage.
    pub fn with_service(
        service: Arc<dyn StructuredExtractionService>,
        policy: FieldPolicy,
    ) -> Self {
        Self::build(
            Arc::new(ExtractionOrchestrator::with_service(service)),
            policy,
        )
    }

    fn build(orchestrator: Arc<ExtractionOrchestrator>, policy: FieldPolicy) -> Self {
        Self {
            invoice: InvoiceExtractor::new(orchestrator.clone()),
            statement: StatementExtractor::new(orchestrator),
            policy,
            default_currency: None,
        }
    }

    /// Stamp invoices with this currency when the document states none.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = Some(currency.into());
        self
    }

    fn extractor(&self, kind: DocumentKind) -> &dyn ContentExtractor {
        match kind {
            DocumentKind::Invoice => &self.invoice,
            DocumentKind::Statement => &self.statement,
        }
    }

    /// Parse file bytes into raw text and a field map.
    ///
    /// Fatal only when the extension is unrecognized or every text backend
    /// fails; extraction-stage trouble degrades to an empty field map.
    pub async fn parse_document(
        &self,
        data: &[u8],
        declared_extension: &str,
        kind: DocumentKind,
    ) -> Result<ExtractedDocument> {
        let file_kind = FileKind::from_extension(declared_extension)
            .ok_or_else(|| TextError::UnsupportedFormat(declared_extension.to_string()))?;

        let raw_text = text::extract_text(data, file_kind)?;
        let outcome = self.extractor(kind).parse(&raw_text).await;

        info!(
            ?file_kind,
            source = ?outcome.source,
            fields = outcome.fields.len(),
            "parsed document"
        );

        Ok(ExtractedDocument {
            raw_text,
            parsed_fields: outcome.fields,
            file_kind,
        })
    }

    /// Parse and normalize an invoice in one motion.
    pub async fn parse_invoice(
        &self,
        data: &[u8],
        declared_extension: &str,
    ) -> Result<(ExtractedDocument, InvoiceRecord)> {
        let doc = self
            .parse_document(data, declared_extension, DocumentKind::Invoice)
            .await?;
        let mut record = normalize_invoice(&doc.parsed_fields, self.policy)?;
        if record.currency.is_none() && !record.is_empty() {
            record.currency = self.default_currency.clone();
        }
        Ok((doc, record))
    }

    /// Parse and normalize bank statement content in one motion.
    ///
    /// This is the generic content path; CSV statement exports should go to
    /// [`crate::statement::parse_statement`] instead, which reads the table
    /// directly and bypasses generative extraction.
    pub async fn parse_transaction(
        &self,
        data: &[u8],
        declared_extension: &str,
    ) -> Result<(ExtractedDocument, TransactionRecord)> {
        let doc = self
            .parse_document(data, declared_extension, DocumentKind::Statement)
            .await?;
        let record = normalize_transaction(&doc.parsed_fields, self.policy)?;
        Ok((doc, record))
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new(FieldPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn upload_validation_enforces_the_size_limit() {
        let limits = UploadLimits::default();
        let err = validate_upload("a.pdf", limits.max_file_size + 1, &limits).unwrap_err();
        assert!(matches!(err, FindocError::FileTooLarge { .. }));
    }

    #[test]
    fn upload_validation_rejects_unknown_extensions() {
        let limits = UploadLimits::default();
        let err = validate_upload("malware.exe", 10, &limits).unwrap_err();
        assert!(matches!(err, FindocError::Text(TextError::UnsupportedFormat(_))));

        let err = validate_upload("no_extension", 10, &limits).unwrap_err();
        assert!(matches!(err, FindocError::Text(TextError::UnsupportedFormat(_))));
    }

    #[test]
    fn upload_validation_maps_extensions_to_kinds() {
        let limits = UploadLimits::default();
        assert_eq!(validate_upload("Q1 Invoice.PDF", 10, &limits).unwrap(), FileKind::Pdf);
        assert_eq!(validate_upload("export.csv", 10, &limits).unwrap(), FileKind::Csv);
        assert_eq!(validate_upload("book.xlsx", 10, &limits).unwrap(), FileKind::Spreadsheet);
    }

    #[tokio::test]
    async fn unsupported_extension_is_fatal_to_parse() {
        let pipeline = DocumentPipeline::default();
        let err = pipeline
            .parse_document(b"anything", "docx", DocumentKind::Invoice)
            .await
            .unwrap_err();
        assert!(matches!(err, FindocError::Text(TextError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn default_currency_fills_only_nonempty_records() {
        let pipeline = DocumentPipeline::default().with_default_currency("INR");

        let (_, record) = pipeline
            .parse_invoice(b"Invoice #,INV-1\nTotal,100.00\n", "csv")
            .await
            .unwrap();
        assert_eq!(record.currency.as_deref(), Some("INR"));

        // An empty record stays empty; the default is not invented data.
        let (_, record) = pipeline
            .parse_invoice(b"just,some\nrandom,cells\n", "csv")
            .await
            .unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn csv_invoice_goes_through_text_then_fallback() {
        let csv = b"field,value\nInvoice #,INV-9\nTotal,450.00\n";
        let pipeline = DocumentPipeline::default();
        let (doc, record) = pipeline.parse_invoice(csv, "csv").await.unwrap();

        assert_eq!(doc.file_kind, FileKind::Csv);
        assert!(doc.raw_text.contains("INV-9"));
        assert_eq!(doc.parsed_fields["invoice_number"], json!("INV-9"));
        assert_eq!(record.invoice_number.as_deref(), Some("INV-9"));
    }
}
