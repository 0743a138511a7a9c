use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be > 0")]
    InvalidQuestionCount,

    #[error("seconds per question must be > 0")]
    InvalidSecondsPerQuestion,

    #[error("reveal delay must be at most 10000 ms")]
    InvalidRevealDelay,

    #[error("{which} options cannot be empty")]
    EmptyOptions { which: &'static str },

    #[error("{which} options must be positive and strictly increasing")]
    UnorderedOptions { which: &'static str },

    #[error("default {which} ({value}) is not one of the options")]
    DefaultNotOffered { which: &'static str, value: u32 },
}

//
// ─── POOL POLICY ───────────────────────────────────────────────────────────────
//

/// What to do when the pool holds fewer entries than the requested question count.
///
/// A pool that cannot fill a single option set is rejected under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPolicy {
    /// Shrink the quiz to the pool size.
    #[default]
    Clamp,
    /// Refuse to start the quiz.
    Strict,
}

//
// ─── QUIZ SETTINGS ─────────────────────────────────────────────────────────────
//

const DEFAULT_REVEAL_DELAY_MS: u32 = 1_000;
const MAX_REVEAL_DELAY_MS: u32 = 10_000;

/// Per-session configuration, immutable once a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizSettings {
    question_count: u32,
    seconds_per_question: u32,
    reveal_delay_ms: u32,
    pool_policy: PoolPolicy,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns error if either value is zero.
    pub fn new(question_count: u32, seconds_per_question: u32) -> Result<Self, SettingsError> {
        if question_count == 0 {
            return Err(SettingsError::InvalidQuestionCount);
        }
        if seconds_per_question == 0 {
            return Err(SettingsError::InvalidSecondsPerQuestion);
        }
        Ok(Self {
            question_count,
            seconds_per_question,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            pool_policy: PoolPolicy::default(),
        })
    }

    /// Pause between locking an answer and moving on, so the answer can be highlighted.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRevealDelay` above 10 seconds.
    pub fn with_reveal_delay_ms(mut self, millis: u32) -> Result<Self, SettingsError> {
        if millis > MAX_REVEAL_DELAY_MS {
            return Err(SettingsError::InvalidRevealDelay);
        }
        self.reveal_delay_ms = millis;
        Ok(self)
    }

    #[must_use]
    pub fn with_pool_policy(mut self, policy: PoolPolicy) -> Self {
        self.pool_policy = policy;
        self
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::milliseconds(i64::from(self.reveal_delay_ms))
    }

    #[must_use]
    pub fn pool_policy(&self) -> PoolPolicy {
        self.pool_policy
    }
}

//
// ─── SETTINGS CATALOG ──────────────────────────────────────────────────────────
//

/// The choices offered on the settings screen.
///
/// Passed to whatever builds sessions instead of living in process-wide constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsCatalog {
    question_options: Vec<u32>,
    time_options: Vec<u32>,
    default_question_count: u32,
    default_seconds: u32,
}

impl SettingsCatalog {
    /// The stock option lists: 10–30 flags in steps of 5, 5–20 seconds.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            question_options: vec![10, 15, 20, 25, 30],
            time_options: vec![5, 10, 15, 20],
            default_question_count: 10,
            default_seconds: 5,
        }
    }

    /// # Errors
    ///
    /// Returns error if a list is empty, unordered, contains zero, or does not
    /// offer its default.
    pub fn new(
        question_options: Vec<u32>,
        time_options: Vec<u32>,
        default_question_count: u32,
        default_seconds: u32,
    ) -> Result<Self, SettingsError> {
        validate_options("question", &question_options, default_question_count)?;
        validate_options("time", &time_options, default_seconds)?;
        Ok(Self {
            question_options,
            time_options,
            default_question_count,
            default_seconds,
        })
    }

    #[must_use]
    pub fn question_options(&self) -> &[u32] {
        &self.question_options
    }

    #[must_use]
    pub fn time_options(&self) -> &[u32] {
        &self.time_options
    }

    /// Settings preselected when the screen opens.
    ///
    /// # Errors
    ///
    /// Never fails for a validated catalog; propagates `QuizSettings::new` otherwise.
    pub fn default_settings(&self) -> Result<QuizSettings, SettingsError> {
        QuizSettings::new(self.default_question_count, self.default_seconds)
    }

    /// Build settings from raw slider values, snapping each to the nearest option.
    ///
    /// # Errors
    ///
    /// Propagates `QuizSettings::new`.
    pub fn settings_for(
        &self,
        question_count: u32,
        seconds_per_question: u32,
    ) -> Result<QuizSettings, SettingsError> {
        QuizSettings::new(
            snap(&self.question_options, question_count),
            snap(&self.time_options, seconds_per_question),
        )
    }

    #[must_use]
    pub fn snap_question_count(&self, value: u32) -> u32 {
        snap(&self.question_options, value)
    }

    #[must_use]
    pub fn snap_seconds(&self, value: u32) -> u32 {
        snap(&self.time_options, value)
    }
}

impl Default for SettingsCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_options(which: &'static str, options: &[u32], default: u32) -> Result<(), SettingsError> {
    if options.is_empty() {
        return Err(SettingsError::EmptyOptions { which });
    }
    if options[0] == 0 || options.windows(2).any(|w| w[0] >= w[1]) {
        return Err(SettingsError::UnorderedOptions { which });
    }
    if !options.contains(&default) {
        return Err(SettingsError::DefaultNotOffered {
            which,
            value: default,
        });
    }
    Ok(())
}

// Nearest option; ties go to the smaller one. `options` is non-empty and sorted.
fn snap(options: &[u32], value: u32) -> u32 {
    options
        .iter()
        .copied()
        .min_by_key(|opt| opt.abs_diff(value))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_reject_zero_values() {
        assert_eq!(
            QuizSettings::new(0, 5).unwrap_err(),
            SettingsError::InvalidQuestionCount
        );
        assert_eq!(
            QuizSettings::new(10, 0).unwrap_err(),
            SettingsError::InvalidSecondsPerQuestion
        );
    }

    #[test]
    fn settings_builder_defaults() {
        let settings = QuizSettings::new(3, 5).unwrap();
        assert_eq!(settings.reveal_delay(), Duration::seconds(1));
        assert_eq!(settings.pool_policy(), PoolPolicy::Clamp);

        let strict = settings
            .with_pool_policy(PoolPolicy::Strict)
            .with_reveal_delay_ms(0)
            .unwrap();
        assert_eq!(strict.pool_policy(), PoolPolicy::Strict);
        assert_eq!(strict.reveal_delay(), Duration::zero());
        assert!(settings.with_reveal_delay_ms(60_000).is_err());
    }

    #[test]
    fn standard_catalog_defaults() {
        let catalog = SettingsCatalog::standard();
        let settings = catalog.default_settings().unwrap();
        assert_eq!(settings.question_count(), 10);
        assert_eq!(settings.seconds_per_question(), 5);
        assert_eq!(catalog.question_options(), &[10, 15, 20, 25, 30]);
        assert_eq!(catalog.time_options(), &[5, 10, 15, 20]);
    }

    #[test]
    fn catalog_snaps_to_nearest_option() {
        let catalog = SettingsCatalog::standard();
        assert_eq!(catalog.snap_question_count(1), 10);
        assert_eq!(catalog.snap_question_count(17), 15);
        assert_eq!(catalog.snap_question_count(18), 20);
        assert_eq!(catalog.snap_question_count(99), 30);
        assert_eq!(catalog.snap_seconds(12), 10);

        let settings = catalog.settings_for(24, 19).unwrap();
        assert_eq!(settings.question_count(), 25);
        assert_eq!(settings.seconds_per_question(), 20);
    }

    #[test]
    fn catalog_validates_lists() {
        assert_eq!(
            SettingsCatalog::new(vec![], vec![5], 10, 5).unwrap_err(),
            SettingsError::EmptyOptions { which: "question" }
        );
        assert_eq!(
            SettingsCatalog::new(vec![10, 10], vec![5], 10, 5).unwrap_err(),
            SettingsError::UnorderedOptions { which: "question" }
        );
        assert_eq!(
            SettingsCatalog::new(vec![10], vec![0, 5], 10, 5).unwrap_err(),
            SettingsError::UnorderedOptions { which: "time" }
        );
        assert_eq!(
            SettingsCatalog::new(vec![10], vec![5], 10, 7).unwrap_err(),
            SettingsError::DefaultNotOffered {
                which: "time",
                value: 7
            }
        );
    }
}
