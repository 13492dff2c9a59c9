//! Where questions come from.
//!
//! The session controller only knows the [`QuestionSource`] trait; the
//! OpenTDB client is the one real implementation.

mod opentdb;
mod text;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::models::{Difficulty, Question, QuizConfig};

pub use opentdb::{DEFAULT_BASE_URL, OpenTdbClient};
pub use text::to_plain_text;

/// One request for a batch of multiple-choice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRequest {
    pub amount: u32,
    pub category: u32,
    pub difficulty: Difficulty,
}

impl QuestionRequest {
    /// Query parameters in the order the API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("amount", self.amount.to_string()),
            ("category", self.category.to_string()),
            ("type", "multiple".to_string()),
        ];
        if let Some(difficulty) = self.difficulty.as_query() {
            pairs.push(("difficulty", difficulty.to_string()));
        }
        pairs
    }
}

impl From<&QuizConfig> for QuestionRequest {
    fn from(config: &QuizConfig) -> Self {
        Self {
            amount: config.question_count,
            category: config.topic_id,
            difficulty: config.difficulty,
        }
    }
}

/// Status code the question API puts in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCode(pub u8);

impl ResponseCode {
    pub const SUCCESS: ResponseCode = ResponseCode(0);
    pub const NO_RESULTS: ResponseCode = ResponseCode(1);
    pub const INVALID_PARAMETER: ResponseCode = ResponseCode(2);
    pub const TOKEN_NOT_FOUND: ResponseCode = ResponseCode(3);
    pub const TOKEN_EMPTY: ResponseCode = ResponseCode(4);
    pub const RATE_LIMIT: ResponseCode = ResponseCode(5);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meaning = match *self {
            Self::SUCCESS => "success",
            Self::NO_RESULTS => "no results for these filters",
            Self::INVALID_PARAMETER => "invalid parameter",
            Self::TOKEN_NOT_FOUND => "session token not found",
            Self::TOKEN_EMPTY => "session token exhausted",
            Self::RATE_LIMIT => "rate limited, wait a few seconds",
            _ => "unknown response code",
        };
        write!(f, "code {}: {}", self.0, meaning)
    }
}

/// A decoded response. Questions are only meaningful when `code` is success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedQuestions {
    pub code: ResponseCode,
    pub questions: Vec<Question>,
}

/// Answers requests for questions.
pub trait QuestionSource {
    fn fetch(
        &self,
        request: &QuestionRequest,
    ) -> impl Future<Output = Result<FetchedQuestions, FetchError>> + Send;
}
