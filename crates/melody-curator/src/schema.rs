//! Declared output schema and response validation.
//!
//! The schema is sent with every request so the provider constrains its
//! output. The returned text is still validated locally: all four song
//! fields must be present and `category` must be one of the two tags.

use serde_json::{json, Value};

use melody_core::model::Category;
use melody_core::RecommendationResponse;

use crate::error::{CurateError, CurateResult};

/// The output schema in the provider's schema dialect.
pub fn response_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "songs": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "artist": { "type": "STRING" },
                        "reason": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": categories }
                    },
                    "required": ["title", "artist", "reason", "category"]
                }
            }
        },
        "required": ["songs"]
    })
}

/// Validate the provider's text payload into a typed response.
///
/// # Errors
/// - [`CurateError::EmptyResponse`] when there is no text, or only
///   whitespace.
/// - [`CurateError::MalformedResponse`] when the text is not JSON of the
///   declared shape.
pub fn parse_response(text: Option<&str>, source_name: &str) -> CurateResult<RecommendationResponse> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => {
            return Err(CurateError::EmptyResponse {
                source_name: source_name.to_string(),
            })
        }
    };

    serde_json::from_str(strip_code_fence(text)).map_err(|e| CurateError::MalformedResponse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the info string ("json") up to the first newline.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .map_or(text, str::trim)
}
