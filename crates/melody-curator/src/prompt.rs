//! Prompt rendering.
//!
//! Both request modes share the same curator framing and output rules; only
//! the description of what the listener wants differs. Rendering is pure
//! and deterministic for a given input.

use melody_core::model::{FOREIGN_COUNT, KOREAN_COUNT, SONG_COUNT};
use melody_core::{RecommendationInput, Selection, Theme, UserPreferences};

const NO_PREFERENCE: &str = "no particular preference";

/// Render the instruction string sent to the provider.
pub fn build_prompt(input: &RecommendationInput) -> String {
    let request = match input {
        RecommendationInput::Theme(theme) => describe_theme(theme),
        RecommendationInput::Personalized(prefs) => describe_preferences(prefs),
    };

    format!(
        "Act as a professional music curator. {request}\n\
         Provide exactly {SONG_COUNT} song recommendations.\n\
         Follow these strict rules:\n\
         1. Return exactly {KOREAN_COUNT} Korean songs and {FOREIGN_COUNT} Foreign (International) songs.\n\
         2. For each song, provide the title, artist, a short reason why it fits listening on the subway or bus during a commute, and the category ('Korean' or 'Foreign').\n\
         3. Respond only in valid JSON format: an object with a single field \"songs\", a list of objects with the fields \"title\", \"artist\", \"reason\" and \"category\"."
    )
}

fn describe_theme(theme: &Theme) -> String {
    format!(
        "The user wants music recommendations for their commute (subway or bus) based on the theme or genre: \"{}\".",
        theme
    )
}

fn describe_preferences(prefs: &UserPreferences) -> String {
    let mut lines = vec![
        "The user wants a personalized playlist for their commute (subway or bus) based on their music taste:".to_string(),
        format!("- Preferred genres: {}", join_or_default(&prefs.genres)),
        format!("- Preferred eras: {}", join_or_default(&prefs.eras)),
    ];

    if let Some(vibe) = prefs.selected_vibe() {
        lines.push(format!("- Mood for today's ride: {vibe}"));
    }

    let extra = prefs.extra_info.trim();
    if !extra.is_empty() {
        lines.push(format!("- Additional notes from the user: {extra}"));
    }

    lines.join("\n")
}

fn join_or_default(selection: &Selection) -> String {
    if selection.is_empty() {
        NO_PREFERENCE.to_string()
    } else {
        selection.iter().collect::<Vec<_>>().join(", ")
    }
}
