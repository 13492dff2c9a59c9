use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::question::{DEFAULT_TOPIC, Difficulty};

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 20;
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// What to ask the question source for. Fixed for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub question_count: u32,
    pub topic_id: u32,
    pub difficulty: Difficulty,
}

impl QuizConfig {
    pub fn new(
        question_count: u32,
        topic_id: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ValidationError> {
        let config = Self {
            question_count,
            topic_id,
            difficulty,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.question_count) {
            Ok(())
        } else {
            Err(ValidationError::CountOutOfRange(self.question_count))
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            topic_id: DEFAULT_TOPIC.id,
            difficulty: Difficulty::Any,
        }
    }
}
