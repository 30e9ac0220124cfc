//! Core domain model for commute-melody.
//!
//! This crate defines the preference record collected from the user, the
//! song and response types returned by the curator, the request input
//! (free-text theme or preferences), and the catalog of selectable options.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    Category, Composition, PreferenceForm, RecommendationInput, RecommendationResponse,
    Selection, Song, Theme, UserPreferences,
};
