//! The seam to the external text generation service.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CurateResult;

/// One generation call: the prompt plus the schema the output must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
        }
    }
}

/// A text generation provider.
///
/// Implementations perform exactly one round trip per call and return the
/// raw text payload, or `None` when the provider answered without text.
/// Transport failures are returned as errors; nothing is retried.
#[async_trait]
pub trait Generator: std::fmt::Debug + Send + Sync {
    /// Provider name used in errors and logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> CurateResult<Option<String>>;
}
