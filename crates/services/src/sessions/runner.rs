use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;
use tokio::time::Instant;

use quiz_core::model::QuizResult;

use super::events::{QuizEvent, QuizObserver};
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Input from the player while a quiz runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    Answer(String),
    Quit,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(QuizResult),
    /// The player quit or the input channel closed before the last question.
    Abandoned { score: u32, answered: usize },
}

/// Drives a session on a single task: sleeps until the next deadline, applies
/// player input as it arrives, and reports every event to an observer.
#[derive(Debug, Clone, Copy)]
pub struct QuizRunner {
    clock: Clock,
}

impl QuizRunner {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Run `session` to completion or until the player leaves.
    ///
    /// Session time starts at the runner's clock and advances with tokio's
    /// clock, so a paused tokio runtime drives the quiz on virtual time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Stalled` if the session stops scheduling work
    /// without finishing, or any error raised while advancing.
    pub async fn run<O>(
        &self,
        mut session: QuizSession,
        inputs: &mut mpsc::Receiver<PlayerInput>,
        observer: &mut O,
    ) -> Result<RunOutcome, SessionError>
    where
        O: QuizObserver + ?Sized,
    {
        let base = self.clock.now();
        let epoch = Instant::now();
        let now = || session_time(base, epoch);

        emit(observer, session.take_events());

        while !session.is_finished() {
            let Some(deadline) = session.next_deadline() else {
                break;
            };
            let wait = (deadline - now()).to_std().unwrap_or_default();

            tokio::select! {
                biased;
                () = tokio::time::sleep(wait) => {
                    let events = session.run_until(now())?;
                    emit(observer, events);
                }
                input = inputs.recv() => match input {
                    Some(PlayerInput::Answer(name)) => {
                        // Overdue ticks go first so an expired countdown wins over a late answer.
                        let at = now();
                        let events = session.run_until(at)?;
                        emit(observer, events);
                        session.submit_answer(Some(&name), at);
                        emit(observer, session.take_events());
                    }
                    Some(PlayerInput::Quit) | None => {
                        log::debug!("player left at question {}", session.question_number());
                        return Ok(RunOutcome::Abandoned {
                            score: session.score(),
                            answered: session.answers().len(),
                        });
                    }
                },
            }
        }

        session
            .result()
            .map(RunOutcome::Completed)
            .ok_or(SessionError::Stalled)
    }
}

fn session_time(base: DateTime<Utc>, epoch: Instant) -> DateTime<Utc> {
    base + Duration::from_std(epoch.elapsed()).unwrap_or_else(|_| Duration::zero())
}

fn emit<O: QuizObserver + ?Sized>(observer: &mut O, events: Vec<QuizEvent>) {
    for event in &events {
        observer.on_event(event);
    }
}
