mod events;
mod options;
mod progress;
mod runner;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use events::{AnswerRecord, Highlight, QuizEvent, QuizObserver};
pub use options::{OPTION_COUNT, QuizPlan, QuizPlanBuilder, build_options};
pub use progress::SessionProgress;
pub use runner::{PlayerInput, QuizRunner, RunOutcome};
pub use service::{QuizSession, SessionPhase, SubmitOutcome};
pub use workflow::QuizService;
