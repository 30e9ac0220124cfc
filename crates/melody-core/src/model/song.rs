use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

const SEARCH_BASE: &str = "https://www.youtube.com/results?search_query=";

/// Origin tag carried by every recommended song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Korean,
    Foreign,
}

impl Category {
    /// All tags, in the order they appear in the declared schema.
    pub const ALL: [Category; 2] = [Category::Korean, Category::Foreign];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::Foreign => "Foreign",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidData(format!("unknown category: {s}")))
    }
}

/// A single recommended song.
///
/// All four fields are required on the wire. Extra fields sent by the
/// provider are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,

    /// Why the song fits a subway or bus ride.
    pub reason: String,

    pub category: Category,
}

impl Song {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        reason: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            reason: reason.into(),
            category,
        }
    }

    /// YouTube search link for `"{artist} {title}"`.
    #[must_use]
    pub fn search_url(&self) -> String {
        let query = format!("{} {}", self.artist, self.title);
        format!("{SEARCH_BASE}{}", urlencoding::encode(&query))
    }
}
