//! Gemini HTTP backend for structured extraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::ServiceError;
use crate::schema::ExtractionSchema;
use crate::{FieldMap, Result, StructuredExtractionService};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Structured extraction backed by the Gemini `generateContent` API.
///
/// Holds a pooled `reqwest::Client`, so a single instance can be shared
/// across concurrent parse invocations.
pub struct GeminiExtractor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiExtractor {
    /// Create an extractor for the given model and API key.
    pub fn new(model: &str, api_key: &str) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Create an extractor against a custom endpoint (used in tests).
    pub fn with_endpoint(endpoint: &str, model: &str, api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(ServiceError::MissingCredentials("gemini".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    /// Bound every extraction call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_prompt(&self, text: &str, schema: &ExtractionSchema) -> String {
        format!(
            "{}\n\nFields to extract:\n{}\nRespond with a single JSON object keyed by the \
             field names above.\n\nDocument text:\n\n{}",
            schema.instruction,
            schema.describe_fields(),
            text
        )
    }
}

#[derive(Serialize)]
struct Req {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct Resp {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: RespContent,
}

#[derive(Deserialize)]
struct RespContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}

#[derive(Deserialize)]
struct RespPart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl StructuredExtractionService for GeminiExtractor {
    async fn extract(&self, text: &str, schema: &ExtractionSchema) -> Result<FieldMap> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let body = Req {
            contents: vec![Content {
                parts: vec![Part {
                    text: self.build_prompt(text, schema),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: "application/json".to_string(),
            },
        };

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout(self.timeout.as_secs())
                } else {
                    ServiceError::Http(e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let out: Resp = resp.json().await?;
        let payload = out
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| ServiceError::MalformedResponse("empty candidates".to_string()))?;

        let raw: FieldMap = serde_json::from_str(strip_code_fences(payload))
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        debug!(schema = schema.name.as_str(), fields = raw.len(), "service returned payload");

        let fields = schema.validate(raw);
        if fields.is_empty() {
            return Err(ServiceError::Schema(schema.name.clone()));
        }
        Ok(fields)
    }
}

/// Strip a Markdown code fence wrapper, if present, from a model reply.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_plain_fences() {
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn leaves_bare_json_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn missing_key_is_rejected_up_front() {
        assert!(matches!(
            GeminiExtractor::new("gemini-pro", ""),
            Err(ServiceError::MissingCredentials(_))
        ));
    }

    #[test]
    fn prompt_includes_instruction_and_fields() {
        let svc = GeminiExtractor::new("gemini-pro", "test-key").unwrap();
        let schema = crate::schema::invoice_schema();
        let prompt = svc.build_prompt("some invoice text", &schema);
        assert!(prompt.contains(&schema.instruction));
        assert!(prompt.contains("invoice_number"));
        assert!(prompt.contains("some invoice text"));
    }
}
