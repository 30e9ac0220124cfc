use anyhow::Result;
use melody_core::{Composition, RecommendationInput};
use melody_curator::Session;

/// Print the songs of the session's latest request.
///
/// Prints nothing for a failed request; [`session_outcome`] reports it.
pub fn print_session(session: &Session) {
    if session.error().is_some() {
        return;
    }

    let heading = session
        .last_input()
        .map(RecommendationInput::label)
        .unwrap_or_default();

    let songs = session.songs();
    let composition = Composition::of(songs);

    println!("\nCOMMUTE PLAYLIST");
    println!("\"{heading}\"를 위한 추천");
    println!("{}\n", count_line(composition));

    for (index, song) in songs.iter().enumerate() {
        println!("  #{} [{}] {}", index + 1, song.category, song.title);
        println!("     {}", song.artist);
        println!("     \"{}\"", song.reason);
        println!("     {}", song.search_url());
        println!();
    }
}

/// Turn a failed session into an error so the command exits non-zero.
pub fn session_outcome(session: &Session) -> Result<()> {
    match session.error() {
        Some(message) => anyhow::bail!("{message}"),
        None => Ok(()),
    }
}

/// Heading line for the playlist as it was actually returned.
fn count_line(composition: Composition) -> String {
    format!(
        "오늘의 추천곡 {}선 (Korean {} : Foreign {})",
        composition.total(),
        composition.korean,
        composition.foreign
    )
}
