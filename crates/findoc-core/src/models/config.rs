//! Configuration structures for the findoc pipeline.

use serde::{Deserialize, Serialize};

use crate::extract::FieldPolicy;

/// Main configuration for the findoc pipeline.
///
/// Read once at startup and passed explicitly into entry points; there is no
/// ambient global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FindocConfig {
    /// Upload validation limits.
    pub limits: UploadLimits,

    /// Extraction behavior.
    pub extraction: ExtractionConfig,

    /// Generative extraction service settings.
    pub service: ServiceConfig,
}

/// Limits applied to uploaded files before any parsing happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Maximum file size in bytes.
    pub max_file_size: u64,

    /// Recognized extensions, lower-case, without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_extensions: vec![
                "pdf".to_string(),
                "csv".to_string(),
                "xlsx".to_string(),
                "xls".to_string(),
            ],
        }
    }
}

/// Extraction pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Deadline for a single service call, in seconds.
    pub service_timeout_secs: u64,

    /// What to do when a field fails validation.
    pub field_policy: FieldPolicy,

    /// Currency assumed when the document does not state one.
    pub default_currency: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            service_timeout_secs: 30,
            field_policy: FieldPolicy::BestEffort,
            default_currency: "INR".to_string(),
        }
    }
}

/// Settings for the generative extraction backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API key; falls back to the GOOGLE_API_KEY environment variable.
    pub api_key: String,

    /// Model identifier.
    pub model: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-pro".to_string(),
        }
    }
}

impl ServiceConfig {
    /// The configured key, or the GOOGLE_API_KEY environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

impl FindocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
