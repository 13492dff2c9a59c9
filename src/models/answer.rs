use serde::Serialize;

/// Outcome of one question. Written once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub prompt: String,
    /// `None` when the timer ran out.
    pub selected_option: Option<String>,
    pub correct_answer: String,
    pub was_correct: bool,
}
