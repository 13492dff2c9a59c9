use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A multiple-choice question as shown to the player.
///
/// Text is plain: entities and tags from the source are resolved before a
/// `Question` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
            category: None,
            difficulty: None,
        }
    }

    /// All answer choices, correct answer last, in source order.
    pub fn choices(&self) -> Vec<String> {
        let mut choices = self.incorrect_answers.clone();
        choices.push(self.correct_answer.clone());
        choices
    }

    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

/// Question difficulty filter. `Any` leaves the filter unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Any,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Any,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    /// Value for the `difficulty` query parameter, if the filter is set.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            Difficulty::Any => None,
            Difficulty::Easy => Some("easy"),
            Difficulty::Medium => Some("medium"),
            Difficulty::Hard => Some("hard"),
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Any => "Any",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// A named question category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub name: &'static str,
    pub id: u32,
}

pub const TOPICS: [Topic; 4] = [
    Topic { name: "Computer Science", id: 18 },
    Topic { name: "Mathematics", id: 19 },
    Topic { name: "Science", id: 17 },
    Topic { name: "General Knowledge", id: 9 },
];

pub const DEFAULT_TOPIC: Topic = TOPICS[0];

/// Case-insensitive lookup in the topic table.
pub fn topic_by_name(name: &str) -> Option<Topic> {
    TOPICS
        .iter()
        .copied()
        .find(|topic| topic.name.eq_ignore_ascii_case(name.trim()))
}

pub fn topic_by_id(id: u32) -> Option<Topic> {
    TOPICS.iter().copied().find(|topic| topic.id == id)
}
