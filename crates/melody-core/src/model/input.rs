use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::preferences::UserPreferences;

/// A non-blank free-text theme (genre, mood, or situation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Theme(String);

impl Theme {
    /// Trim and validate a theme.
    ///
    /// # Errors
    /// Returns [`Error::BlankTheme`] for empty or whitespace-only input.
    pub fn new(text: impl AsRef<str>) -> Result<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(Error::BlankTheme);
        }
        Ok(Self(text.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Theme {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.0
    }
}

/// What a recommendation request is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "input", rename_all = "snake_case")]
pub enum RecommendationInput {
    /// Simple mode: a single free-text theme.
    Theme(Theme),
    /// Personalized mode: a full preference record.
    Personalized(UserPreferences),
}

impl RecommendationInput {
    /// Simple-mode input from raw text.
    ///
    /// # Errors
    /// Returns [`Error::BlankTheme`] for blank text.
    pub fn theme(text: impl AsRef<str>) -> Result<Self> {
        Theme::new(text).map(Self::Theme)
    }

    /// Re-check the pre-submission invariant for this input.
    pub fn validate(&self) -> Result<()> {
        match self {
            // Construction already rejected blank themes.
            Self::Theme(_) => Ok(()),
            Self::Personalized(prefs) => prefs.validate(),
        }
    }

    /// Short human-readable description for headings and logs.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Theme(theme) => theme.to_string(),
            Self::Personalized(prefs) => {
                let mut parts: Vec<&str> = prefs.genres.iter().collect();
                if let Some(vibe) = prefs.selected_vibe() {
                    parts.push(vibe);
                }
                parts.join(" · ")
            }
        }
    }
}

impl From<Theme> for RecommendationInput {
    fn from(theme: Theme) -> Self {
        Self::Theme(theme)
    }
}

impl From<UserPreferences> for RecommendationInput {
    fn from(prefs: UserPreferences) -> Self {
        Self::Personalized(prefs)
    }
}
