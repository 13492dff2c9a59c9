//! The quiz session state machine, free of timers and I/O.
//!
//! `SessionController` owns one of these and feeds it ticks, submissions and
//! settle calls; everything here is synchronous and deterministic given the
//! rng passed in.

use rand::Rng;
use uuid::Uuid;

use crate::error::InvariantViolation;
use crate::models::{AnswerRecord, Question, QuizConfig};

use super::options::{OptionCache, OptionSet};

/// Coarse lifecycle stage, as seen by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Choosing count, topic and difficulty.
    Setup,
    /// Waiting for the question source.
    Loading,
    /// Answering questions.
    InProgress,
    /// Showing the summary.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown moved by one second.
    Counted,
    /// Countdown expired and an empty answer was recorded.
    TimedOut,
    /// Countdown expired while an answer was already pending.
    Reset,
    /// Session is over.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Advanced(usize),
    Ended,
}

/// Score line for the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub total: usize,
    pub elapsed_secs: u32,
}

impl Summary {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.score as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// One run of the quiz.
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    config: QuizConfig,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    /// Answer shown as feedback, committed to `answers` on settle.
    pending: Option<AnswerRecord>,
    time_budget: u32,
    time_remaining: u32,
    elapsed_total: u32,
    input_locked: bool,
    ended: bool,
    options: OptionCache,
}

impl SessionState {
    /// `questions` must be non-empty.
    pub fn new<R: Rng + ?Sized>(
        config: QuizConfig,
        questions: Vec<Question>,
        time_budget: u32,
        rng: &mut R,
    ) -> Self {
        let time_budget = time_budget.max(1);
        let mut options = OptionCache::default();
        if let Some(first) = questions.first() {
            options.select(0, first, rng);
        }

        Self {
            id: Uuid::new_v4(),
            config,
            ended: questions.is_empty(),
            questions,
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            pending: None,
            time_budget,
            time_remaining: time_budget,
            elapsed_total: 0,
            input_locked: false,
            options,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.ended {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// The answer awaiting its feedback delay, if any.
    pub fn pending(&self) -> Option<&AnswerRecord> {
        self.pending.as_ref()
    }

    pub fn time_budget(&self) -> u32 {
        self.time_budget
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn elapsed_total(&self) -> u32 {
        self.elapsed_total
    }

    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn option_set(&self) -> Option<&OptionSet> {
        self.options.current()
    }

    pub fn options(&self) -> &[String] {
        self.options.current().map(OptionSet::options).unwrap_or(&[])
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            total: self.questions.len(),
            elapsed_secs: self.elapsed_total,
        }
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> Result<TickOutcome, InvariantViolation> {
        if self.ended {
            return Ok(TickOutcome::Idle);
        }

        self.elapsed_total += 1;

        if self.time_remaining > 1 {
            self.time_remaining -= 1;
            return Ok(TickOutcome::Counted);
        }

        self.time_remaining = self.time_budget;
        match self.submit(None)? {
            Some(_) => Ok(TickOutcome::TimedOut),
            None => Ok(TickOutcome::Reset),
        }
    }

    /// Record an answer for the active question.
    ///
    /// Returns `Ok(None)` when input is locked: the first answer for a
    /// question wins.
    pub fn submit(
        &mut self,
        option: Option<&str>,
    ) -> Result<Option<&AnswerRecord>, InvariantViolation> {
        if self.input_locked && !self.ended {
            return Ok(None);
        }

        let question = self
            .current_question()
            .ok_or(InvariantViolation::NoActiveQuestion)?;

        if let Some(option) = option {
            let offered = self.options.current().is_some_and(|set| set.contains(option));
            if !offered {
                return Err(InvariantViolation::UnknownOption(option.to_string()));
            }
        }

        let record = AnswerRecord {
            prompt: question.prompt.clone(),
            selected_option: option.map(str::to_string),
            correct_answer: question.correct_answer.clone(),
            was_correct: option.is_some_and(|option| question.is_correct(option)),
        };

        self.input_locked = true;
        let record = self.pending.insert(record);
        Ok(Some(&*record))
    }

    /// Commit the pending answer and move on.
    pub fn settle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Settled, InvariantViolation> {
        let record = self
            .pending
            .take()
            .ok_or(InvariantViolation::NoActiveQuestion)?;

        if record.was_correct {
            self.score += 1;
        }
        self.answers.push(record);

        let next = self.current_index + 1;
        let Some(question) = self.questions.get(next) else {
            self.ended = true;
            return Ok(Settled::Ended);
        };

        self.current_index = next;
        self.time_remaining = self.time_budget;
        self.input_locked = false;
        self.options.select(next, question, rng);
        Ok(Settled::Advanced(next))
    }
}
