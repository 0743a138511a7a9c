#![forbid(unsafe_code)]

pub mod error;
pub mod scheduler;
pub mod sessions;
pub mod timer;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::SessionError;
pub use scheduler::{TaskHandle, TimerQueue};
pub use timer::{CountdownTimer, TickOutcome, TimerTick};

pub use sessions::{
    AnswerRecord, Highlight, OPTION_COUNT, PlayerInput, QuizEvent, QuizObserver, QuizPlan,
    QuizPlanBuilder, QuizRunner, QuizService, QuizSession, RunOutcome, SessionPhase,
    SessionProgress, SubmitOutcome, build_options,
};
