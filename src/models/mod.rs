mod answer;
mod question;
mod quiz_config;

pub use answer::AnswerRecord;
pub use question::{
    DEFAULT_TOPIC, Difficulty, Question, TOPICS, Topic, topic_by_id, topic_by_name,
};
pub use quiz_config::{DEFAULT_QUESTION_COUNT, MAX_QUESTIONS, MIN_QUESTIONS, QuizConfig};
