//! HTTP client for the Open Trivia Database.
//!
//! Calls are instrumented with latency and result counts; question text is
//! never logged.

use std::time::{Duration, Instant};

use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::FetchError;
use crate::models::Question;

use super::text::to_plain_text;
use super::{FetchedQuestions, QuestionRequest, QuestionSource, ResponseCode};

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";

#[derive(Clone)]
pub struct OpenTdbClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    response_code: ResponseCode,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Deserialize)]
struct ApiQuestion {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl From<ApiQuestion> for Question {
    fn from(raw: ApiQuestion) -> Self {
        Question {
            prompt: to_plain_text(&raw.question),
            correct_answer: to_plain_text(&raw.correct_answer),
            incorrect_answers: raw
                .incorrect_answers
                .iter()
                .map(|answer| to_plain_text(answer))
                .collect(),
            category: raw.category.as_deref().map(to_plain_text),
            difficulty: raw.difficulty,
        }
    }
}

impl OpenTdbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl QuestionSource for OpenTdbClient {
    #[instrument(level = "info", skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, request: &QuestionRequest) -> Result<FetchedQuestions, FetchError> {
        let started = Instant::now();
        let response = self
            .client
            .get(&self.base_url)
            .header(USER_AGENT, concat!("trivia-quiz/", env!("CARGO_PKG_VERSION")))
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "trivia_quiz", %status, "question source returned an HTTP error");
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        let fetched = parse_response(&body)?;
        info!(
            target: "trivia_quiz",
            code = fetched.code.0,
            count = fetched.questions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched questions"
        );
        Ok(fetched)
    }
}

fn parse_response(body: &str) -> Result<FetchedQuestions, FetchError> {
    let raw: ApiResponse = serde_json::from_str(body)?;
    Ok(FetchedQuestions {
        code: raw.response_code,
        questions: raw.results.into_iter().map(Question::from).collect(),
    })
}
