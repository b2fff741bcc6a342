//! Primary/fallback extraction orchestration.

use std::sync::Arc;

use tracing::{debug, warn};

use super::rules::{self, INVOICE_RULES, STATEMENT_RULES};
use super::DocumentKind;
use findoc_extract::{
    invoice_schema, statement_schema, FieldMap, StructuredExtractionService,
};

/// Which stage produced the field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// The generative-model service answered with conforming fields.
    Service,
    /// The deterministic matcher battery ran (service absent or failed).
    Fallback,
}

/// The orchestrator's terminal state: fields plus their provenance.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub fields: FieldMap,
    pub source: ExtractionSource,
}

/// Drives primary (service) extraction with a deterministic fallback.
///
/// Extraction never fails: a service error transitions to the fallback, and
/// an empty field map is a valid terminal result. Only emptiness signals
/// degraded quality.
#[derive(Default)]
pub struct ExtractionOrchestrator {
    service: Option<Arc<dyn StructuredExtractionService>>,
}

impl ExtractionOrchestrator {
    /// An orchestrator with no service; every parse uses the fallback.
    pub fn new() -> Self {
        Self { service: None }
    }

    /// Attach a structured extraction service as the primary stage.
    pub fn with_service(service: Arc<dyn StructuredExtractionService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Extract a field map from raw text.
    pub async fn extract(&self, text: &str, kind: DocumentKind) -> ExtractionOutcome {
        if let Some(service) = &self.service {
            let schema = match kind {
                DocumentKind::Invoice => invoice_schema(),
                DocumentKind::Statement => statement_schema(),
            };
            match service.extract(text, &schema).await {
                Ok(fields) => {
                    debug!(schema = schema.name.as_str(), fields = fields.len(), "service extraction succeeded");
                    return ExtractionOutcome {
                        fields,
                        source: ExtractionSource::Service,
                    };
                }
                Err(e) => {
                    warn!(schema = schema.name.as_str(), error = %e, "service extraction failed, using fallback matchers");
                }
            }
        }

        let battery = match kind {
            DocumentKind::Invoice => &*INVOICE_RULES,
            DocumentKind::Statement => &*STATEMENT_RULES,
        };

        ExtractionOutcome {
            fields: rules::evaluate(text, battery),
            source: ExtractionSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use findoc_extract::{ExtractionSchema, Result as ServiceResult, ServiceError};

    struct FailingService;

    #[async_trait]
    impl StructuredExtractionService for FailingService {
        async fn extract(&self, _: &str, _: &ExtractionSchema) -> ServiceResult<FieldMap> {
            Err(ServiceError::Timeout(30))
        }
    }

    struct CannedService(FieldMap);

    #[async_trait]
    impl StructuredExtractionService for CannedService {
        async fn extract(&self, _: &str, _: &ExtractionSchema) -> ServiceResult<FieldMap> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn service_failure_falls_back_without_raising() {
        let orch = ExtractionOrchestrator::with_service(Arc::new(FailingService));
        let outcome = orch.extract("Invoice #: F-1\nTotal: 99.00", DocumentKind::Invoice).await;

        assert_eq!(outcome.source, ExtractionSource::Fallback);
        assert_eq!(outcome.fields["invoice_total"], json!(99.0));
    }

    #[tokio::test]
    async fn fallback_on_unmatchable_text_is_empty_not_an_error() {
        let orch = ExtractionOrchestrator::new();
        let outcome = orch.extract("nothing financial here", DocumentKind::Statement).await;

        assert_eq!(outcome.source, ExtractionSource::Fallback);
        assert!(outcome.fields.is_empty());
    }

    #[tokio::test]
    async fn service_result_wins_when_available() {
        let mut canned = FieldMap::new();
        canned.insert("invoice_number".to_string(), json!("SVC-1"));

        let orch = ExtractionOrchestrator::with_service(Arc::new(CannedService(canned)));
        let outcome = orch.extract("irrelevant", DocumentKind::Invoice).await;

        assert_eq!(outcome.source, ExtractionSource::Service);
        assert_eq!(outcome.fields["invoice_number"], json!("SVC-1"));
    }
}
