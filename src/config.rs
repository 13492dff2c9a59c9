//! Settings loaded from an optional TOML file.
//!
//! Every key has a default, so an empty or missing file is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{DEFAULT_QUESTION_COUNT, DEFAULT_TOPIC, Difficulty, QuizConfig, topic_by_name};
use crate::session::SessionTiming;
use crate::source::DEFAULT_BASE_URL;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TRIVIA_QUIZ_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown topic {0:?}")]
    UnknownTopic(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quiz: QuizSettings,
    pub source: SourceSettings,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub question_count: u32,
    pub topic: String,
    pub difficulty: Difficulty,
    pub time_per_question_secs: u32,
    pub feedback_delay_ms: u64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            topic: DEFAULT_TOPIC.name.to_string(),
            difficulty: Difficulty::Any,
            time_per_question_secs: 15,
            feedback_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub filter: String,
    /// Logs go nowhere without a file; the terminal belongs to the UI.
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
            format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(target: "trivia_quiz", path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Load from `path`, else from `$TRIVIA_QUIZ_CONFIG`, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::load(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }

    /// Initial values for the setup form. The count is clamped by the form.
    pub fn quiz_config(&self) -> Result<QuizConfig, ConfigError> {
        let topic = topic_by_name(&self.quiz.topic)
            .ok_or_else(|| ConfigError::UnknownTopic(self.quiz.topic.clone()))?;
        Ok(QuizConfig {
            question_count: self.quiz.question_count,
            topic_id: topic.id,
            difficulty: self.quiz.difficulty,
        })
    }

    pub fn timing(&self) -> SessionTiming {
        SessionTiming {
            time_per_question_secs: self.quiz.time_per_question_secs.max(1),
            feedback_delay: Duration::from_millis(self.quiz.feedback_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.quiz.question_count, 5);
        assert_eq!(settings.source.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(settings.logging.file.is_none());
        assert_eq!(settings.quiz_config().unwrap(), QuizConfig::default());
        assert_eq!(settings.timing(), SessionTiming::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_toml_str(
            r#"
            [quiz]
            topic = "Mathematics"
            difficulty = "hard"
            time_per_question_secs = 30

            [logging]
            file = "quiz.log"
            format = "json"
            "#,
        )
        .unwrap();

        let config = settings.quiz_config().unwrap();
        assert_eq!(config.topic_id, 19);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(settings.timing().time_per_question_secs, 30);
        assert_eq!(settings.timing().feedback_delay, Duration::from_millis(1000));
        assert_eq!(settings.logging.file.as_deref(), Some(Path::new("quiz.log")));
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_topic() {
        let settings = Settings::from_toml_str("[quiz]\ntopic = \"Sports\"").unwrap();
        assert!(matches!(
            settings.quiz_config(),
            Err(ConfigError::UnknownTopic(topic)) if topic == "Sports"
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
