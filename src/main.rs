use std::path::PathBuf;

use clap::Parser;
use trivia_quiz::models::topic_by_name;
use trivia_quiz::{ConfigError, Difficulty, Quiz, QuizError, Settings, telemetry};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML settings file (defaults to $TRIVIA_QUIZ_CONFIG, then built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of questions to preselect (1-20)
    #[arg(short = 'n', long)]
    count: Option<u32>,

    /// Topic to preselect, e.g. "Computer Science"
    #[arg(short, long)]
    topic: Option<String>,

    /// Difficulty to preselect
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Question API endpoint
    #[arg(long)]
    base_url: Option<String>,
}

fn apply_overrides(settings: &mut Settings, args: Args) -> Result<(), ConfigError> {
    if let Some(count) = args.count {
        settings.quiz.question_count = count;
    }
    if let Some(topic) = args.topic {
        let topic = topic_by_name(&topic).ok_or(ConfigError::UnknownTopic(topic))?;
        settings.quiz.topic = topic.name.to_string();
    }
    if let Some(difficulty) = args.difficulty {
        settings.quiz.difficulty = difficulty;
    }
    if let Some(base_url) = args.base_url {
        settings.source.base_url = base_url;
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), QuizError> {
    let mut settings = Settings::resolve(args.config.as_deref())?;
    apply_overrides(&mut settings, args)?;
    telemetry::init_tracing(&settings.logging)?;

    let quiz = Quiz::from_settings(&settings)?;
    quiz.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
