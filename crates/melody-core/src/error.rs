use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("theme must not be blank")]
    BlankTheme,

    #[error("select at least one genre or a vibe")]
    NoGenreOrVibe,

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
