//! Recommendation requester for commute-melody.
//!
//! Turns a theme or a preference record into a prompt plus a declared
//! output schema, sends it to the generative text provider, and validates
//! the returned JSON before it reaches rendering code.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod requester;
pub mod schema;
pub mod session;

pub use config::Config;
pub use error::{CurateError, CurateResult, FAILURE_MESSAGE};
pub use gemini::GeminiClient;
pub use generator::{GenerationRequest, Generator};
pub use requester::Requester;
pub use session::{Session, SessionState, Ticket};
