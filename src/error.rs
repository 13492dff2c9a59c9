//! Error types for the quiz session and its question source.

use thiserror::Error;

use crate::source::ResponseCode;

/// The question source could not be reached or answered with garbage.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to the question source failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("question source answered with HTTP {0}")]
    Http(reqwest::StatusCode),
    #[error("could not decode the question source response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The request or its answer does not describe a playable quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question count must be between 1 and 20, got {0}")]
    CountOutOfRange(u32),
    #[error("not enough questions available ({0})")]
    Rejected(ResponseCode),
    #[error("not enough questions available (asked for {requested}, got {received})")]
    TooFewQuestions { requested: usize, received: usize },
}

/// Why `start` did not produce a session.
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StartError {
    /// Short text for the notice line on the setup screen.
    pub fn notice(&self) -> String {
        match self {
            StartError::Fetch(_) => {
                "Could not reach the question server. Check your connection and try again."
                    .to_string()
            }
            StartError::Validation(err) => {
                let mut text = err.to_string();
                if let Some(first) = text.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                text
            }
        }
    }
}

/// Internal misuse of the session API. Never shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("no active question")]
    NoActiveQuestion,
    #[error("option {0:?} is not offered for the active question")]
    UnknownOption(String),
}
