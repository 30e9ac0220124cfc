//! Gemini text generation client.
//!
//! Sends one `generateContent` call per request with a JSON response MIME
//! type and the declared response schema, and returns the concatenated
//! text parts of the first candidate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{CurateError, CurateResult};
use crate::generator::{GenerationRequest, Generator};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const SOURCE_NAME: &str = "Gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

// ---------------------------------------------------------------------------
// Wire types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` if it carries no text.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for `model` with a 60 second HTTP timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> CurateResult<Self> {
        Self::with_timeout(api_key, model, Duration::from_secs(60))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> CurateResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("commute-melody/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`CurateError::MissingApiKey`] when no key is configured.
    pub fn from_config(config: &Config) -> CurateResult<Self> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| CurateError::MissingApiKey {
                source_name: SOURCE_NAME.to_string(),
            })?;

        Ok(Self::with_timeout(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?
        .with_base_url(config.api_base_url.clone()))
    }

    /// Point the client at a different API root (proxies, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn generate(&self, request: &GenerationRequest) -> CurateResult<Option<String>> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
            },
        };

        log::debug!("POST {} (model {})", self.endpoint(), self.model);

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CurateError::RateLimited {
                source_name: SOURCE_NAME.to_string(),
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CurateError::Http {
                source_name: SOURCE_NAME.to_string(),
                message: format!("{status}: {}", detail.trim()),
            });
        }

        let payload: GenerateContentResponse =
            response.json().await.map_err(|e| CurateError::MalformedResponse {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?;

        Ok(payload.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL).unwrap();
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(
            client.endpoint(),
            format!("{DEFAULT_API_BASE}/models/{DEFAULT_MODEL}:generateContent")
        );
    }

    #[test]
    fn test_from_config_requires_key() {
        let result = GeminiClient::from_config(&Config::default());
        assert!(matches!(result, Err(CurateError::MissingApiKey { .. })));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GeminiClient::new("k", "m")
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(client.endpoint(), "http://localhost:9999/models/m:generateContent");
    }

    #[test]
    fn test_request_body_shape() {
        let schema = json!({"type": "OBJECT"});
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "{\"songs\""}, {"text": ": []}"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text().as_deref(), Some(r#"{"songs": []}"#));
    }

    #[test]
    fn test_response_without_text() {
        for json in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
            assert!(response.into_text().is_none(), "{json}");
        }
    }
}
