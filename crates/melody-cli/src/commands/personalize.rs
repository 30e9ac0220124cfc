use anyhow::{Context, Result};
use melody_core::{catalog, PreferenceForm, RecommendationInput};
use melody_curator::{Config, GeminiClient, Requester, Session};

use super::render::{print_session, session_outcome};

/// Fill a preference form from command-line selections.
///
/// Each `--genre`/`--era` value toggles that option, so passing the same
/// value twice deselects it, exactly like clicking a form button twice.
pub fn build_form(
    genres: &[String],
    eras: &[String],
    vibe: Option<&str>,
    note: Option<String>,
) -> PreferenceForm {
    let mut form = PreferenceForm::new();

    for genre in genres {
        if !catalog::is_known_genre(genre) {
            log::warn!("'{}' is not one of the offered genres; using it as-is", genre);
        }
        form.toggle_genre(genre);
    }

    for era in eras {
        if !catalog::is_known_era(era) {
            log::warn!("'{}' is not one of the offered eras; using it as-is", era);
        }
        form.toggle_era(era);
    }

    if let Some(vibe) = vibe {
        if !catalog::is_known_vibe(vibe) {
            log::warn!("'{}' is not one of the offered vibes; using it as-is", vibe);
        }
        form.select_vibe(vibe);
    }

    if let Some(note) = note {
        form.set_extra_info(note);
    }

    form
}

/// Request a playlist from the submitted preferences.
pub async fn run_personalize(config: &Config, form: &PreferenceForm) -> Result<()> {
    let prefs = form
        .submit()
        .context("Pick at least one --genre or a --vibe (see 'commute-melody options')")?;

    let client = GeminiClient::from_config(config)
        .context("Set an API key with --api-key, MELODY_GEMINI_API_KEY, or 'commute-melody config set gemini_api_key <KEY>'")?;
    let requester = Requester::new(client);

    println!("당신의 취향을 분석 중...");

    let mut session = Session::new();
    session.run(&requester, RecommendationInput::from(prefs)).await;
    print_session(&session);

    session_outcome(&session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_build_form_collects_selections() {
        let form = build_form(
            &strings(&["K-Pop", "인디"]),
            &strings(&["최신곡"]),
            Some("감성적인"),
            Some("뉴진스 스타일".to_string()),
        );
        let prefs = form.submit().unwrap();
        assert_eq!(prefs.genres.iter().collect::<Vec<_>>(), vec!["K-Pop", "인디"]);
        assert!(prefs.eras.contains("최신곡"));
        assert_eq!(prefs.vibe.as_deref(), Some("감성적인"));
        assert_eq!(prefs.extra_info, "뉴진스 스타일");
    }

    #[test]
    fn test_repeated_genre_toggles_off() {
        let form = build_form(&strings(&["재즈", "재즈"]), &[], None, None);
        assert!(form.preferences().genres.is_empty());
        assert!(form.submit().is_err());
    }
}
