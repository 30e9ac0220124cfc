pub mod input;
pub mod preferences;
pub mod response;
pub mod song;

pub use input::{RecommendationInput, Theme};
pub use preferences::{PreferenceForm, Selection, UserPreferences};
pub use response::{Composition, RecommendationResponse, FOREIGN_COUNT, KOREAN_COUNT, SONG_COUNT};
pub use song::{Category, Song};
