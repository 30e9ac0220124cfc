use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// An insertion-ordered set of selected options.
///
/// Membership is what matters for prompting; the order is kept so the
/// selection renders the way the user picked it. Deserialized lists are
/// trimmed, with blank and repeated entries dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Selection(Vec<String>);

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` if absent, remove it if present.
    ///
    /// Returns whether the value is selected afterwards. Blank values are
    /// ignored and report `false`.
    pub fn toggle(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        if let Some(pos) = self.0.iter().position(|v| v == value) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(value.to_string());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value.trim())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<String>> for Selection {
    fn from(values: Vec<String>) -> Self {
        let mut selection = Self::new();
        for value in &values {
            if !selection.contains(value) {
                selection.toggle(value);
            }
        }
        selection
    }
}

impl From<Selection> for Vec<String> {
    fn from(selection: Selection) -> Self {
        selection.0
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    /// Builds a selection by toggling each value in turn, so a value given
    /// twice ends up deselected.
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut selection = Self::new();
        for value in iter {
            selection.toggle(value);
        }
        selection
    }
}

/// The user's music taste for one personalized request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub genres: Selection,
    #[serde(default)]
    pub eras: Selection,

    /// Single-select mood for the ride.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub vibe: Option<String>,

    /// Free-text notes (favourite artists, situations).
    #[serde(default)]
    pub extra_info: String,
}

/// An empty string means "no vibe selected".
fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

impl UserPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        self.genres.toggle(genre)
    }

    pub fn toggle_era(&mut self, era: &str) -> bool {
        self.eras.toggle(era)
    }

    /// Select the vibe. The last selection wins; a blank value clears it.
    pub fn select_vibe(&mut self, vibe: &str) {
        let vibe = vibe.trim();
        self.vibe = (!vibe.is_empty()).then(|| vibe.to_string());
    }

    pub fn set_extra_info(&mut self, text: impl Into<String>) {
        self.extra_info = text.into();
    }

    /// The selected vibe, trimmed; `None` when unset or blank.
    #[must_use]
    pub fn selected_vibe(&self) -> Option<&str> {
        self.vibe
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// A request needs at least one non-blank genre or a non-blank vibe.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.genres.iter().any(|g| !g.trim().is_empty()) || self.selected_vibe().is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.can_submit() {
            Ok(())
        } else {
            Err(Error::NoGenreOrVibe)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn with_genre(mut self, genre: &str) -> Self {
        self.toggle_genre(genre);
        self
    }

    #[must_use]
    pub fn with_era(mut self, era: &str) -> Self {
        self.toggle_era(era);
        self
    }

    #[must_use]
    pub fn with_vibe(mut self, vibe: &str) -> Self {
        self.select_vibe(vibe);
        self
    }

    #[must_use]
    pub fn with_extra_info(mut self, text: impl Into<String>) -> Self {
        self.set_extra_info(text);
        self
    }
}

/// Form session state for collecting preferences.
///
/// Mutated by user interaction, then handed off as an immutable snapshot
/// on submit.
#[derive(Debug, Clone, Default)]
pub struct PreferenceForm {
    prefs: UserPreferences,
}

impl PreferenceForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        let selected = self.prefs.toggle_genre(genre);
        log::debug!("genre {genre:?} selected={selected}");
        selected
    }

    pub fn toggle_era(&mut self, era: &str) -> bool {
        let selected = self.prefs.toggle_era(era);
        log::debug!("era {era:?} selected={selected}");
        selected
    }

    pub fn select_vibe(&mut self, vibe: &str) {
        self.prefs.select_vibe(vibe);
    }

    pub fn set_extra_info(&mut self, text: impl Into<String>) {
        self.prefs.set_extra_info(text);
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.prefs.can_submit()
    }

    /// Snapshot the current preferences for a request.
    ///
    /// # Errors
    /// Returns [`Error::NoGenreOrVibe`] when neither a genre nor a vibe is
    /// selected.
    pub fn submit(&self) -> Result<UserPreferences> {
        self.prefs.validate()?;
        Ok(self.prefs.clone())
    }

    pub fn reset(&mut self) {
        self.prefs.reset();
    }
}
