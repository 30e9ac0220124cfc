use serde::{Deserialize, Serialize};

use crate::model::song::{Category, Song};

/// Number of songs requested per playlist.
pub const SONG_COUNT: usize = 7;

/// Number of songs tagged [`Category::Korean`] requested per playlist.
pub const KOREAN_COUNT: usize = 5;

/// Number of songs tagged [`Category::Foreign`] requested per playlist.
pub const FOREIGN_COUNT: usize = 2;

/// The commute playlist returned by the provider, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub songs: Vec<Song>,
}

impl RecommendationResponse {
    #[must_use]
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Tally of songs per category.
    #[must_use]
    pub fn composition(&self) -> Composition {
        Composition::of(&self.songs)
    }
}

/// Per-category song counts of a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Composition {
    pub korean: usize,
    pub foreign: usize,
}

impl Composition {
    /// Tally `songs` by category.
    #[must_use]
    pub fn of(songs: &[Song]) -> Self {
        songs.iter().fold(Self::default(), |mut acc, song| {
            match song.category {
                Category::Korean => acc.korean += 1,
                Category::Foreign => acc.foreign += 1,
            }
            acc
        })
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.korean + self.foreign
    }

    /// Whether the tally is exactly the requested 7 songs split 5:2.
    #[must_use]
    pub fn matches_contract(self) -> bool {
        self.korean == KOREAN_COUNT && self.foreign == FOREIGN_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(korean: usize, foreign: usize) -> Vec<Song> {
        let mut songs = Vec::new();
        for i in 0..korean {
            songs.push(Song::new(format!("k{i}"), "artist", "reason", Category::Korean));
        }
        for i in 0..foreign {
            songs.push(Song::new(format!("f{i}"), "artist", "reason", Category::Foreign));
        }
        songs
    }

    #[test]
    fn test_counts_are_consistent() {
        assert_eq!(KOREAN_COUNT + FOREIGN_COUNT, SONG_COUNT);
    }

    #[test]
    fn test_composition_matches_contract() {
        let response = RecommendationResponse::new(songs(5, 2));
        let composition = response.composition();
        assert_eq!(composition.korean, 5);
        assert_eq!(composition.foreign, 2);
        assert_eq!(composition.total(), SONG_COUNT);
        assert!(composition.matches_contract());
    }

    #[test]
    fn test_composition_off_contract() {
        assert!(!RecommendationResponse::new(songs(4, 3)).composition().matches_contract());
        assert!(!RecommendationResponse::new(songs(5, 1)).composition().matches_contract());
        assert!(!RecommendationResponse::default().composition().matches_contract());
    }

    #[test]
    fn test_response_requires_songs_field() {
        let result: std::result::Result<RecommendationResponse, _> =
            serde_json::from_str(r#"{"tracks": []}"#);
        assert!(result.is_err());
    }
}
