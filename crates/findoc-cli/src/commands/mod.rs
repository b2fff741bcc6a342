//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use findoc_core::{DocumentPipeline, FindocConfig};
use findoc_extract::GeminiExtractor;

/// Load configuration from an explicit path, or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FindocConfig> {
    match config_path {
        Some(path) => Ok(FindocConfig::from_file(Path::new(path))?),
        None => Ok(FindocConfig::default()),
    }
}

/// Build the document pipeline from configuration.
///
/// Without resolvable API credentials (or with `fallback_only`) the pipeline
/// runs on the deterministic matchers alone.
pub fn build_pipeline(config: &FindocConfig, fallback_only: bool) -> DocumentPipeline {
    let policy = config.extraction.field_policy;
    let currency = config.extraction.default_currency.clone();

    let pipeline = if fallback_only {
        DocumentPipeline::new(policy)
    } else if let Some(api_key) = config.service.resolve_api_key() {
        match GeminiExtractor::new(&config.service.model, &api_key) {
            Ok(service) => {
                let service = service.with_timeout(std::time::Duration::from_secs(
                    config.extraction.service_timeout_secs,
                ));
                DocumentPipeline::with_service(Arc::new(service), policy)
            }
            Err(e) => {
                warn!(error = %e, "service unavailable; extraction uses fallback matchers only");
                DocumentPipeline::new(policy)
            }
        }
    } else {
        warn!("no API key configured; extraction uses fallback matchers only");
        DocumentPipeline::new(policy)
    };

    pipeline.with_default_currency(currency)
}
