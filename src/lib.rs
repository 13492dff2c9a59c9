//! # trivia-quiz
//!
//! A timed, terminal-based trivia quiz fed by the Open Trivia Database.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = Settings::default();
//!     let quiz = Quiz::from_settings(&settings)?;
//!     quiz.run().await
//! }
//! ```
//!
//! The session logic lives in [`session`] and works with any
//! [`QuestionSource`], so it can be driven without a terminal.

mod app;
pub mod assistant;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod source;
pub mod telemetry;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;

pub use app::{App, SetupField, SetupForm};
pub use config::{ConfigError, Settings};
pub use error::{FetchError, InvariantViolation, StartError, ValidationError};
pub use models::{AnswerRecord, Difficulty, Question, QuizConfig};
pub use session::{Phase, SessionController, SessionEvent, SessionState, SessionTiming};
pub use source::{OpenTdbClient, QuestionSource};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not set up the question source: {0}")]
    Source(#[from] FetchError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz ready to run in the terminal.
pub struct Quiz<S> {
    app: App<S>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Quiz<OpenTdbClient> {
    /// Build a quiz that asks OpenTDB, using the given settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, QuizError> {
        let source = OpenTdbClient::new(settings.source.base_url.clone(), settings.request_timeout())?;
        let initial = settings.quiz_config()?;
        Ok(Self::new(source, settings.timing(), &initial))
    }
}

impl<S: QuestionSource> Quiz<S> {
    pub fn new(source: S, timing: SessionTiming, initial: &QuizConfig) -> Self {
        let (controller, events) = SessionController::new(source, timing);
        Self {
            app: App::new(controller, initial),
            events,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &mut self.events).await;
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App<S> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<S> {
        &mut self.app
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputAction {
    None,
    Start,
    Quit,
}

async fn run_event_loop<S: QuestionSource>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<S>,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<(), QuizError> {
    let mut keys = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            key = keys.next() => {
                let key = match key {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => key,
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                };

                match handle_input(app, key.code) {
                    InputAction::None => {}
                    InputAction::Start => {
                        terminal.draw(ui::render_loading)?;
                        // Failures are shown on the setup screen.
                        let _ = app.start_quiz().await;
                    }
                    InputAction::Quit => break,
                }
            }
            Some(event) = events.recv() => app.handle_event(event),
        }
    }

    Ok(())
}

fn handle_input<S: QuestionSource>(app: &mut App<S>, key: KeyCode) -> InputAction {
    match app.phase() {
        Phase::Setup => handle_setup_input(app, key),
        Phase::Loading => InputAction::None,
        Phase::InProgress => handle_quiz_input(app, key),
        Phase::Ended => handle_result_input(app, key),
    }
}

fn handle_setup_input<S: QuestionSource>(app: &mut App<S>, key: KeyCode) -> InputAction {
    let form = app.form_mut();
    match key {
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => form.next_field(),
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => form.previous_field(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => form.increase(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => form.decrease(),
        KeyCode::Enter => return InputAction::Start,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
        _ => {}
    }
    InputAction::None
}

fn handle_quiz_input<S: QuestionSource>(app: &mut App<S>, key: KeyCode) -> InputAction {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_highlighted(),
        KeyCode::Char(c @ '1'..='4') => app.submit_at(c as usize - '1' as usize),
        KeyCode::Esc => app.back_to_setup(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
        _ => {}
    }
    InputAction::None
}

fn handle_result_input<S: QuestionSource>(app: &mut App<S>, key: KeyCode) -> InputAction {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => return InputAction::Start,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter | KeyCode::Esc => {
            app.back_to_setup()
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
        _ => {}
    }
    InputAction::None
}
