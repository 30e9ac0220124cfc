use melody_core::model::SONG_COUNT;
use melody_core::{RecommendationInput, RecommendationResponse};

use crate::error::CurateResult;
use crate::generator::{GenerationRequest, Generator};
use crate::prompt::build_prompt;
use crate::schema::{parse_response, response_schema};

/// Requests commute playlists from a [`Generator`].
///
/// Stateless: every call builds its own prompt and performs one generation
/// round trip, so concurrent calls are independent of each other.
#[derive(Debug, Clone)]
pub struct Requester<G> {
    generator: G,
}

impl<G: Generator> Requester<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Build the generation request for `input` without sending it.
    pub fn prepare(&self, input: &RecommendationInput) -> GenerationRequest {
        GenerationRequest::new(build_prompt(input), response_schema())
    }

    /// Request recommendations for `input`.
    ///
    /// Input is checked locally first; invalid input never reaches the
    /// provider. The parsed song list is returned as the provider sent it,
    /// even when its size or Korean/Foreign split differs from what the
    /// prompt asked for.
    ///
    /// # Errors
    /// Returns a validation error for invalid input, `EmptyResponse` or
    /// `MalformedResponse` for unusable payloads, and transport errors from
    /// the generator unchanged.
    pub async fn request_recommendations(
        &self,
        input: &RecommendationInput,
    ) -> CurateResult<RecommendationResponse> {
        input.validate()?;

        let request = self.prepare(input);
        log::info!(
            "Requesting recommendations from {} for {:?}",
            self.generator.name(),
            input.label()
        );

        let text = self.generator.generate(&request).await.map_err(|e| {
            log::error!("Generation via {} failed: {}", self.generator.name(), e);
            e
        })?;

        let response = parse_response(text.as_deref(), self.generator.name()).map_err(|e| {
            log::error!("Rejected response from {}: {}", self.generator.name(), e);
            e
        })?;

        let composition = response.composition();
        if composition.matches_contract() {
            log::debug!("Received {} songs", response.len());
        } else {
            log::warn!(
                "{} returned {} songs ({} Korean, {} Foreign); expected {}",
                self.generator.name(),
                composition.total(),
                composition.korean,
                composition.foreign,
                SONG_COUNT
            );
        }

        Ok(response)
    }
}
