//! Wall-clock source for quiz sessions.
//!
//! A session is started at `Clock::now()` and every countdown deadline, tick
//! and reveal is measured from that instant. The async runner takes its base
//! time from a `Clock` and adds tokio's elapsed time on top, so a `Fixed`
//! clock plus a paused runtime replays a whole quiz deterministically.

use chrono::{DateTime, Duration, Utc};

/// Where a quiz session reads "now" from when it starts.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that follows the system time, for live play.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward, e.g. past a countdown or reveal delay.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Shorthand for advancing a fixed clock by whole milliseconds.
    pub fn advance_millis(&mut self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Start time used by deterministic quiz runs (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns `FIXED_TEST_TIMESTAMP` as a session start time.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizSettings;

    #[test]
    fn fixed_clock_steps_through_a_question() {
        let settings = QuizSettings::new(1, 5).unwrap();
        let mut clock = fixed_clock();
        let started = clock.now();

        clock.advance(Duration::seconds(i64::from(settings.seconds_per_question())));
        clock.advance(settings.reveal_delay());
        assert_eq!(clock.now() - started, Duration::seconds(6));
    }

    #[test]
    fn fixed_clock_advances_by_millis() {
        let mut clock = fixed_clock();
        clock.advance_millis(1_500);
        assert_eq!(clock.now(), fixed_now() + Duration::milliseconds(1_500));
        assert!(clock.is_fixed());
    }

    #[test]
    fn default_clock_ignores_advance() {
        let mut clock = Clock::default_clock();
        clock.advance(Duration::days(365));
        assert!(!clock.is_fixed());
        assert!(clock.now() > fixed_now());
    }
}
