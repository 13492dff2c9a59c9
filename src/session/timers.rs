//! Per-session timer tasks.
//!
//! Each task posts [`SessionEvent`]s tagged with the session id and question
//! index it was started for. Aborting a task does not recall events it has
//! already queued, so receivers must compare the tags.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEventKind {
    /// One second of the question countdown passed.
    Tick,
    /// The answer feedback has been shown long enough.
    FeedbackElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEvent {
    pub session: Uuid,
    pub question: usize,
    pub kind: SessionEventKind,
}

pub(crate) struct SessionTimers {
    events: mpsc::UnboundedSender<SessionEvent>,
    ticker: Option<JoinHandle<()>>,
    feedback: Option<JoinHandle<()>>,
}

impl SessionTimers {
    pub fn new(events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            events,
            ticker: None,
            feedback: None,
        }
    }

    /// Replace the countdown ticker. The first tick fires one `period` from now.
    pub fn start_ticker(&mut self, session: Uuid, question: usize, period: Duration) {
        self.cancel_ticker();

        let events = self.events.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let event = SessionEvent {
                    session,
                    question,
                    kind: SessionEventKind::Tick,
                };
                if events.send(event).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn schedule_feedback(&mut self, session: Uuid, question: usize, delay: Duration) {
        if let Some(handle) = self.feedback.take() {
            handle.abort();
        }

        let events = self.events.clone();
        self.feedback = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(SessionEvent {
                session,
                question,
                kind: SessionEventKind::FeedbackElapsed,
            });
        }));
    }

    pub fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.cancel_ticker();
        if let Some(handle) = self.feedback.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.ticker.is_none() && self.feedback.is_none()
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
