//! Error types for the recommendation requester.

use thiserror::Error;

/// The single message shown to the user for any failed request.
pub const FAILURE_MESSAGE: &str = "음악 추천을 가져오는 데 실패했습니다. 다시 시도해 주세요.";

/// Errors that can occur while requesting recommendations.
#[derive(Debug, Error)]
pub enum CurateError {
    /// Input failed a local pre-submission check; nothing was sent.
    #[error("validation error: {0}")]
    Validation(#[from] melody_core::Error),

    /// The provider answered but carried no usable text.
    #[error("empty response from {source_name}")]
    EmptyResponse { source_name: String },

    /// The text was not JSON matching the declared schema.
    #[error("malformed response from {source_name}: {message}")]
    MalformedResponse {
        source_name: String,
        message: String,
    },

    /// The provider returned a non-success HTTP status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The provider returned a rate-limit response.
    #[error("rate limited by {source_name}")]
    RateLimited { source_name: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// No provider API key is configured.
    #[error("no API key configured for {source_name}")]
    MissingApiKey { source_name: String },
}

impl CurateError {
    /// Returns `true` when the error was raised before any network call.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingApiKey { .. })
    }

    /// Returns `true` when the provider call itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::RateLimited { .. } | Self::Request(_)
        )
    }

    /// The message to surface to the user.
    ///
    /// Local errors keep their own wording so the caller can point at the
    /// missing input; everything else collapses into [`FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        if self.is_local() {
            self.to_string()
        } else {
            FAILURE_MESSAGE.to_string()
        }
    }
}

/// Convenience alias for requester results.
pub type CurateResult<T> = std::result::Result<T, CurateError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed() -> CurateError {
        CurateError::MalformedResponse {
            source_name: "Gemini".to_string(),
            message: "missing field `category`".to_string(),
        }
    }

    #[test]
    fn test_remote_errors_share_one_message() {
        let errors = [
            CurateError::EmptyResponse {
                source_name: "Gemini".to_string(),
            },
            malformed(),
            CurateError::RateLimited {
                source_name: "Gemini".to_string(),
            },
        ];
        for error in &errors {
            assert!(!error.is_local());
            assert_eq!(error.user_message(), FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_validation_is_local() {
        let error = CurateError::from(melody_core::Error::BlankTheme);
        assert!(error.is_local());
        assert!(!error.is_transport());
        assert!(error.user_message().contains("theme"));
    }

    #[test]
    fn test_transport_classification() {
        let error = CurateError::Http {
            source_name: "Gemini".to_string(),
            message: "503".to_string(),
        };
        assert!(error.is_transport());
        assert!(!malformed().is_transport());
    }
}
