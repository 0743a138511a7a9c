use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("a quiz must have at least one question")]
    EmptyQuiz,

    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Final outcome of a finished quiz, handed to the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    score: u32,
    total: u32,
}

impl QuizResult {
    /// # Errors
    ///
    /// Returns `QuizResultError` when `total` is zero or `score > total`.
    pub fn new(score: u32, total: u32) -> Result<Self, QuizResultError> {
        if total == 0 {
            return Err(QuizResultError::EmptyQuiz);
        }
        if score > total {
            return Err(QuizResultError::ScoreExceedsTotal { score, total });
        }
        Ok(Self { score, total })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Whole-number percentage, rounded down.
    #[must_use]
    pub fn percent(&self) -> u32 {
        let pct = u64::from(self.score) * 100 / u64::from(self.total);
        u32::try_from(pct).unwrap_or(100)
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}
