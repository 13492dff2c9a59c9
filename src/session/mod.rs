//! Quiz session: state machine, answer ordering, timers and the controller
//! that ties them to a question source.

mod controller;
mod options;
mod state;
mod timers;

pub use controller::{SessionController, SessionTiming};
pub use options::{OptionCache, OptionSet};
pub use state::{Phase, SessionState, Settled, Summary, TickOutcome};
pub use timers::{SessionEvent, SessionEventKind};
