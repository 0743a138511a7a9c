use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Entry, EntryPool, PoolPolicy, QuizSettings};

use crate::error::SessionError;

/// Number of choices shown per question, the correct one included.
pub const OPTION_COUNT: usize = 4;

/// Question selection for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub questions: Vec<Entry>,
    pub requested: usize,
}

impl QuizPlan {
    /// Number of questions actually selected.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// True when the pool was too small for the requested count.
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        self.questions.len() < self.requested
    }
}

/// Draws the ordered question sequence for a session.
pub struct QuizPlanBuilder<'a> {
    settings: &'a QuizSettings,
}

impl<'a> QuizPlanBuilder<'a> {
    #[must_use]
    pub fn new(settings: &'a QuizSettings) -> Self {
        Self { settings }
    }

    /// Shuffle the pool and take the first `question_count` entries.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEnoughEntries` if the pool cannot fill one option
    /// set, and `SessionError::InsufficientQuestions` if it is smaller than the
    /// question count under `PoolPolicy::Strict`.
    pub fn build<R: Rng + ?Sized>(
        self,
        pool: &EntryPool,
        rng: &mut R,
    ) -> Result<QuizPlan, SessionError> {
        let available = pool.len();
        if available < OPTION_COUNT {
            return Err(SessionError::NotEnoughEntries {
                available,
                required: OPTION_COUNT,
            });
        }

        let requested = usize::try_from(self.settings.question_count()).unwrap_or(usize::MAX);
        if available < requested {
            match self.settings.pool_policy() {
                PoolPolicy::Strict => {
                    return Err(SessionError::InsufficientQuestions {
                        available,
                        requested,
                    });
                }
                PoolPolicy::Clamp => {
                    log::debug!("clamping quiz from {requested} to {available} questions");
                }
            }
        }

        let mut questions = pool.entries().to_vec();
        questions.shuffle(rng);
        questions.truncate(requested);

        Ok(QuizPlan {
            questions,
            requested,
        })
    }
}

/// Pick three other entries at random, add the correct one, and shuffle.
///
/// With fewer than three distractors available the set is simply shorter.
pub fn build_options<R: Rng + ?Sized>(pool: &[Entry], correct: &Entry, rng: &mut R) -> Vec<Entry> {
    let mut distractors: Vec<&Entry> = pool
        .iter()
        .filter(|entry| entry.name() != correct.name())
        .collect();
    distractors.shuffle(rng);
    distractors.truncate(OPTION_COUNT - 1);

    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.clone());
    options.extend(distractors.into_iter().cloned());
    options.shuffle(rng);
    options
}
