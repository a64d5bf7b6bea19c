use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during one `/chat` round trip.
///
/// The widget degrades all of these to the same fixed fallback message; the
/// variants only exist so the log says what actually happened.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request to chat backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat backend returned status {0}")]
    Status(StatusCode),

    #[error("could not decode chat backend response: {0}")]
    Decode(String),
}
