use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

use quiz_core::model::{Entry, EntryPool, QuizResult, QuizSettings};

use super::events::{AnswerRecord, QuizEvent};
use super::options::{QuizPlanBuilder, build_options};
use super::progress::SessionProgress;
use crate::error::SessionError;
use crate::scheduler::{TaskHandle, TimerQueue};
use crate::timer::{CountdownTimer, TickOutcome, TimerTick};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTask {
    Tick,
    Advance,
}

impl From<TimerTick> for SessionTask {
    fn from(_: TimerTick) -> Self {
        Self::Tick
    }
}

/// Where a session stands. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress { index: usize },
    Finished(QuizResult),
}

/// Result of `QuizSession::submit_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(AnswerRecord),
    /// The question was already locked or the session is over.
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of the quiz.
///
/// The session owns its countdown and the queue the countdown schedules into,
/// so nothing it scheduled can fire once it is dropped. Time only moves when
/// the caller passes a later `now` to `run_until`.
pub struct QuizSession {
    settings: QuizSettings,
    pool: Vec<Entry>,
    questions: Vec<Entry>,
    total: u32,
    index: usize,
    score: u32,
    options: Vec<Entry>,
    locked: bool,
    pending_advance: Option<TaskHandle>,
    answers: Vec<AnswerRecord>,
    result: Option<QuizResult>,
    timer: CountdownTimer,
    queue: TimerQueue<SessionTask>,
    events: Vec<QuizEvent>,
    rng: StdRng,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session: sample the questions, build the first option set and
    /// start the countdown.
    ///
    /// `now` should come from the caller's clock to keep time deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEnoughEntries` or
    /// `SessionError::InsufficientQuestions` for undersized pools.
    pub fn start(
        settings: QuizSettings,
        pool: &EntryPool,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        Self::start_with_rng(settings, pool, now, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same as `start`, drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// See `start`.
    pub fn start_with_rng(
        settings: QuizSettings,
        pool: &EntryPool,
        now: DateTime<Utc>,
        mut rng: StdRng,
    ) -> Result<Self, SessionError> {
        let plan = QuizPlanBuilder::new(&settings).build(pool, &mut rng)?;
        let total = u32::try_from(plan.total()).unwrap_or(u32::MAX);

        let mut session = Self {
            settings,
            pool: pool.entries().to_vec(),
            questions: plan.questions,
            total,
            index: 0,
            score: 0,
            options: Vec::new(),
            locked: false,
            pending_advance: None,
            answers: Vec::new(),
            result: None,
            timer: CountdownTimer::new(settings.seconds_per_question()),
            queue: TimerQueue::new(),
            events: Vec::new(),
            rng,
            started_at: now,
            completed_at: None,
        };
        log::debug!(
            "quiz started: {} questions, {}s each",
            session.total,
            session.settings.seconds_per_question()
        );
        session.begin_question(now);
        Ok(session)
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.result {
            Some(result) => SessionPhase::Finished(result),
            None => SessionPhase::InProgress { index: self.index },
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// True between an answer being accepted and the next question starting.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Zero-based index of the current (or last) question.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based question number for display.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.index + 1
    }

    /// Number of questions in this session, after any clamping.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The entry the current question asks for. `None` once finished.
    #[must_use]
    pub fn current_entry(&self) -> Option<&Entry> {
        if self.is_finished() {
            None
        } else {
            self.questions.get(self.index)
        }
    }

    #[must_use]
    pub fn options(&self) -> &[Entry] {
        &self.options
    }

    #[must_use]
    pub fn questions(&self) -> &[Entry] {
        &self.questions
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        SessionProgress {
            total,
            answered: self.answers.len(),
            remaining: total.saturating_sub(self.answers.len()),
            score: self.score,
            is_complete: self.is_finished(),
        }
    }

    /// When the next scheduled tick or advance is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.queue.next_deadline()
    }

    /// Drain events emitted since the last drain.
    pub fn take_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lock the current question with the player's answer.
    ///
    /// `None` or an empty string counts as no answer and is always wrong.
    /// Advancing happens later, `reveal_delay` after `now`, via `run_until`.
    pub fn submit_answer(&mut self, selected: Option<&str>, now: DateTime<Utc>) -> SubmitOutcome {
        if self.is_finished() || self.locked {
            log::trace!("ignoring answer for locked question {}", self.question_number());
            return SubmitOutcome::Ignored;
        }
        let Some(correct) = self.questions.get(self.index) else {
            return SubmitOutcome::Ignored;
        };

        self.locked = true;
        self.timer.stop(&mut self.queue);

        let selected = selected.filter(|s| !s.is_empty());
        let is_correct = selected.is_some_and(|s| correct.is_named(s));
        let record = AnswerRecord {
            question: self.index,
            selected: selected.map(str::to_owned),
            correct_name: correct.name().to_owned(),
            is_correct,
        };
        if is_correct {
            self.score += 1;
        }
        log::debug!(
            "question {} locked: {}",
            self.question_number(),
            if is_correct { "correct" } else { "wrong" }
        );

        self.answers.push(record.clone());
        self.pending_advance = Some(
            self.queue
                .schedule_at(now + self.settings.reveal_delay(), SessionTask::Advance),
        );
        self.events.push(QuizEvent::Answered {
            record: record.clone(),
            score: self.score,
        });
        SubmitOutcome::Accepted(record)
    }

    /// Move past a locked question right away instead of waiting for the
    /// scheduled advance. Returns false if no question is awaiting advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the final tally is inconsistent.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        let Some(handle) = self.pending_advance.take() else {
            return Ok(false);
        };
        self.queue.cancel(handle);
        self.advance_from(now)?;
        Ok(true)
    }

    /// Fire every scheduled task due at or before `now`, in deadline order,
    /// and return the events emitted since the last drain.
    ///
    /// Each task runs at its own deadline, so a single call spanning several
    /// seconds replays them exactly as a live clock would.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the final tally is inconsistent.
    pub fn run_until(&mut self, now: DateTime<Utc>) -> Result<Vec<QuizEvent>, SessionError> {
        while let Some((handle, task)) = self.queue.pop_due(now) {
            let at = handle.deadline();
            match task {
                SessionTask::Tick => match self.timer.on_tick(&mut self.queue, handle) {
                    TickOutcome::Ticked { remaining } => {
                        let number = self.question_number();
                        log::trace!("question {number} tick: {remaining}s left");
                        self.events.push(QuizEvent::Tick { number, remaining });
                    }
                    TickOutcome::Expired => self.on_time_up(at),
                    TickOutcome::Stale => log::trace!("dropping stale tick"),
                },
                SessionTask::Advance => {
                    if self.pending_advance == Some(handle) {
                        self.pending_advance = None;
                        self.advance_from(at)?;
                    }
                }
            }
        }
        Ok(self.take_events())
    }

    fn on_time_up(&mut self, at: DateTime<Utc>) {
        let number = self.question_number();
        self.events.push(QuizEvent::Tick {
            number,
            remaining: 0,
        });
        if self.locked {
            return;
        }
        log::debug!("question {number} timed out");
        self.events.push(QuizEvent::TimeUp { number });
        self.submit_answer(None, at);
    }

    fn advance_from(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.begin_question(now);
            Ok(())
        } else {
            self.finish(now)
        }
    }

    fn begin_question(&mut self, now: DateTime<Utc>) {
        let Some(correct) = self.questions.get(self.index) else {
            return;
        };
        let glyph = correct.glyph().to_owned();
        self.options = build_options(&self.pool, correct, &mut self.rng);
        self.locked = false;
        self.timer.start(&mut self.queue, now);

        let number = self.question_number();
        self.events.push(QuizEvent::QuestionStarted {
            number,
            total: self.total,
            glyph,
            options: self.options.iter().map(|o| o.name().to_owned()).collect(),
            seconds: self.timer.limit(),
        });
    }

    fn finish(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.is_finished() {
            return Ok(());
        }
        let result = QuizResult::new(self.score, self.total)?;
        self.timer.stop(&mut self.queue);
        self.queue.clear();
        self.locked = true;
        self.result = Some(result);
        self.completed_at = Some(now);
        log::debug!("quiz finished: {} of {}", result.score(), result.total());
        self.events.push(QuizEvent::Finished(result));
        Ok(())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("pool_len", &self.pool.len())
            .field("total", &self.total)
            .field("index", &self.index)
            .field("score", &self.score)
            .field("locked", &self.locked)
            .field("remaining", &self.timer.remaining())
            .field("result", &self.result)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
