//! Session controller: owns the active session, its timers and the question
//! source, and applies every state transition.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::{InvariantViolation, StartError, ValidationError};
use crate::models::{Question, QuizConfig};
use crate::source::{FetchedQuestions, QuestionRequest, QuestionSource};

use super::state::{Phase, SessionState, Settled, TickOutcome};
use super::timers::{SessionEvent, SessionEventKind, SessionTimers};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Per-question countdown and feedback pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub time_per_question_secs: u32,
    pub feedback_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            time_per_question_secs: 15,
            feedback_delay: Duration::from_millis(1000),
        }
    }
}

pub struct SessionController<S> {
    source: S,
    timing: SessionTiming,
    phase: Phase,
    state: Option<SessionState>,
    timers: SessionTimers,
    rng: StdRng,
}

impl<S: QuestionSource> SessionController<S> {
    /// Build a controller and the receiver its timer events arrive on.
    ///
    /// Every event from the receiver must be passed back to
    /// [`SessionController::handle_event`].
    pub fn new(source: S, timing: SessionTiming) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            source,
            timing,
            phase: Phase::Setup,
            state: None,
            timers: SessionTimers::new(tx),
            rng: StdRng::from_entropy(),
        };
        (controller, rx)
    }

    /// Use a fixed rng for option shuffling.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    /// Fetch questions and begin a fresh session, replacing any previous one.
    ///
    /// On failure the phase returns to `Setup` and the previous session, if
    /// any, is left untouched apart from its timers being stopped.
    pub async fn start(&mut self, config: QuizConfig) -> Result<(), StartError> {
        self.timers.cancel_all();
        self.phase = Phase::Loading;

        match self.load(&config).await {
            Ok(questions) => {
                let state = SessionState::new(
                    config,
                    questions,
                    self.timing.time_per_question_secs,
                    &mut self.rng,
                );
                info!(
                    target: "trivia_quiz",
                    session = %state.id(),
                    count = state.total_questions(),
                    topic = config.topic_id,
                    difficulty = %config.difficulty,
                    "session started"
                );
                self.timers.start_ticker(state.id(), 0, TICK_PERIOD);
                self.state = Some(state);
                self.phase = Phase::InProgress;
                Ok(())
            }
            Err(err) => {
                warn!(target: "trivia_quiz", error = %err, "could not start session");
                self.phase = Phase::Setup;
                Err(err)
            }
        }
    }

    async fn load(&self, config: &QuizConfig) -> Result<Vec<Question>, StartError> {
        config.validate()?;
        let request = QuestionRequest::from(config);
        let fetched = self.source.fetch(&request).await?;
        accept(config, fetched).map_err(StartError::from)
    }

    /// One second of the countdown. No-op outside `InProgress`.
    pub fn tick(&mut self) -> Option<&SessionState> {
        if self.phase == Phase::InProgress {
            if let Some(state) = self.state.as_mut() {
                match state.tick() {
                    Ok(TickOutcome::TimedOut) => {
                        debug!(
                            target: "trivia_quiz",
                            question = state.current_index(),
                            "question timed out"
                        );
                        self.timers.schedule_feedback(
                            state.id(),
                            state.current_index(),
                            self.timing.feedback_delay,
                        );
                    }
                    Ok(_) => {}
                    Err(err) => {
                        error!(target: "trivia_quiz", error = %err, "tick on a session without a question");
                    }
                }
            }
        }
        self.state.as_ref()
    }

    /// Answer the active question. `None` records an empty answer.
    ///
    /// Returns `Ok(false)` when an answer for this question is already
    /// pending.
    pub fn submit_answer(&mut self, option: Option<&str>) -> Result<bool, InvariantViolation> {
        if self.phase != Phase::InProgress {
            return Err(InvariantViolation::NoActiveQuestion);
        }
        let state = self
            .state
            .as_mut()
            .ok_or(InvariantViolation::NoActiveQuestion)?;

        let correct = match state.submit(option)? {
            Some(record) => record.was_correct,
            None => return Ok(false),
        };
        debug!(
            target: "trivia_quiz",
            question = state.current_index(),
            correct,
            "answer submitted"
        );

        let (id, index) = (state.id(), state.current_index());
        self.timers
            .schedule_feedback(id, index, self.timing.feedback_delay);
        Ok(true)
    }

    /// Apply a timer event. Events for another session or question are dropped.
    pub fn handle_event(&mut self, event: SessionEvent) {
        let current = self
            .state
            .as_ref()
            .filter(|_| self.phase == Phase::InProgress)
            .map(|state| (state.id(), state.current_index()));

        if current != Some((event.session, event.question)) {
            debug!(target: "trivia_quiz", ?event, "dropping stale timer event");
            return;
        }

        match event.kind {
            SessionEventKind::Tick => {
                self.tick();
            }
            SessionEventKind::FeedbackElapsed => self.settle(),
        }
    }

    fn settle(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match state.settle(&mut self.rng) {
            Ok(Settled::Advanced(index)) => {
                self.timers.start_ticker(state.id(), index, TICK_PERIOD);
            }
            Ok(Settled::Ended) => {
                self.timers.cancel_all();
                self.phase = Phase::Ended;
                let summary = state.summary();
                info!(
                    target: "trivia_quiz",
                    session = %state.id(),
                    score = summary.score,
                    total = summary.total,
                    elapsed_secs = summary.elapsed_secs,
                    "session ended"
                );
            }
            Err(err) => {
                error!(target: "trivia_quiz", error = %err, "feedback elapsed without a pending answer");
            }
        }
    }

    /// Drop the current session and go back to setup.
    pub fn discard(&mut self) {
        self.timers.cancel_all();
        if let Some(state) = self.state.take() {
            debug!(target: "trivia_quiz", session = %state.id(), "session discarded");
        }
        self.phase = Phase::Setup;
    }
}

fn accept(config: &QuizConfig, fetched: FetchedQuestions) -> Result<Vec<Question>, ValidationError> {
    if !fetched.code.is_success() {
        return Err(ValidationError::Rejected(fetched.code));
    }

    let requested = config.question_count as usize;
    let mut questions = fetched.questions;
    if questions.len() < requested {
        return Err(ValidationError::TooFewQuestions {
            requested,
            received: questions.len(),
        });
    }
    questions.truncate(requested);
    Ok(questions)
}
