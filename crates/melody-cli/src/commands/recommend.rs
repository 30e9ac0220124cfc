use anyhow::{Context, Result};
use melody_core::RecommendationInput;
use melody_curator::{Config, GeminiClient, Requester, Session};

use super::render::{print_session, session_outcome};

/// Request a playlist for a free-text theme.
pub async fn run_recommend(config: &Config, theme: String) -> Result<()> {
    let input = RecommendationInput::theme(&theme)
        .context("Enter a theme, genre, or mood, e.g. \"비 오는 날 감성\"")?;

    let client = GeminiClient::from_config(config)
        .context("Set an API key with --api-key, MELODY_GEMINI_API_KEY, or 'commute-melody config set gemini_api_key <KEY>'")?;
    let requester = Requester::new(client);

    log::info!("Curating songs for \"{}\"", input.label());
    println!("큐레이팅 중...");

    let mut session = Session::new();
    session.run(&requester, input).await;
    print_session(&session);

    session_outcome(&session)
}
