use tracing::error;
use uuid::Uuid;

use crate::error::StartError;
use crate::models::{Difficulty, MAX_QUESTIONS, MIN_QUESTIONS, QuizConfig, TOPICS, Topic};
use crate::session::{Phase, SessionController, SessionEvent, SessionState};
use crate::source::QuestionSource;

/// Field focused on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Count,
    Topic,
    Difficulty,
}

impl SetupField {
    const ORDER: [SetupField; 3] = [SetupField::Count, SetupField::Topic, SetupField::Difficulty];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Values being edited before a quiz starts. Always describes a valid config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    pub field: SetupField,
    pub count: u32,
    topic: usize,
    pub difficulty: Difficulty,
}

impl SetupForm {
    pub fn from_config(config: &QuizConfig) -> Self {
        Self {
            field: SetupField::Count,
            count: config.question_count.clamp(MIN_QUESTIONS, MAX_QUESTIONS),
            topic: TOPICS
                .iter()
                .position(|topic| topic.id == config.topic_id)
                .unwrap_or(0),
            difficulty: config.difficulty,
        }
    }

    pub fn topic(&self) -> Topic {
        TOPICS[self.topic % TOPICS.len()]
    }

    pub fn config(&self) -> QuizConfig {
        QuizConfig {
            question_count: self.count,
            topic_id: self.topic().id,
            difficulty: self.difficulty,
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    pub fn increase(&mut self) {
        match self.field {
            SetupField::Count => self.count = (self.count + 1).min(MAX_QUESTIONS),
            SetupField::Topic => self.topic = (self.topic + 1) % TOPICS.len(),
            SetupField::Difficulty => self.difficulty = self.difficulty.next(),
        }
    }

    pub fn decrease(&mut self) {
        match self.field {
            SetupField::Count => self.count = self.count.saturating_sub(1).max(MIN_QUESTIONS),
            SetupField::Topic => self.topic = (self.topic + TOPICS.len() - 1) % TOPICS.len(),
            SetupField::Difficulty => self.difficulty = self.difficulty.previous(),
        }
    }
}

/// Everything the render surface needs, plus the intents it can send.
pub struct App<S> {
    controller: SessionController<S>,
    form: SetupForm,
    notice: Option<String>,
    highlighted_option: usize,
    highlighted_for: Option<(Uuid, usize)>,
    result_scroll: usize,
}

impl<S: QuestionSource> App<S> {
    pub fn new(controller: SessionController<S>, initial: &QuizConfig) -> Self {
        Self {
            controller,
            form: SetupForm::from_config(initial),
            notice: None,
            highlighted_option: 0,
            highlighted_for: None,
            result_scroll: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.controller.state()
    }

    pub fn controller(&self) -> &SessionController<S> {
        &self.controller
    }

    pub fn form(&self) -> &SetupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SetupForm {
        &mut self.form
    }

    /// Message from the last failed start, shown on the setup screen.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlighted_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Start a quiz with the form's values.
    pub async fn start_quiz(&mut self) -> Result<(), StartError> {
        self.notice = None;
        let result = self.controller.start(self.form.config()).await;
        if let Err(err) = &result {
            self.notice = Some(err.notice());
        }
        self.sync_highlight();
        self.result_scroll = 0;
        result
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        self.controller.handle_event(event);
        self.sync_highlight();
    }

    pub fn back_to_setup(&mut self) {
        self.controller.discard();
        self.highlighted_for = None;
        self.highlighted_option = 0;
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted_option = (self.highlighted_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted_option = (self.highlighted_option + count - 1) % count;
        }
    }

    /// Submit the highlighted option.
    pub fn submit_highlighted(&mut self) {
        self.submit_at(self.highlighted_option);
    }

    /// Submit the option at `position` in display order.
    pub fn submit_at(&mut self, position: usize) {
        let Some(option) = self
            .controller
            .state()
            .and_then(|state| state.options().get(position).cloned())
        else {
            return;
        };
        self.highlighted_option = position;
        if let Err(err) = self.controller.submit_answer(Some(&option)) {
            error!(target: "trivia_quiz", error = %err, "answer rejected");
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .session()
            .map(|state| state.answers().len().saturating_sub(1))
            .unwrap_or(0);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn option_count(&self) -> usize {
        self.session().map(|state| state.options().len()).unwrap_or(0)
    }

    /// Move the highlight back to the top when a new question appears.
    fn sync_highlight(&mut self) {
        let current = self
            .controller
            .state()
            .filter(|_| self.controller.phase() == Phase::InProgress)
            .map(|state| (state.id(), state.current_index()));
        if current != self.highlighted_for {
            self.highlighted_for = current;
            self.highlighted_option = 0;
        }
    }
}
