use quiz_core::model::QuizResult;

/// How the presentation layer should mark an option once an answer is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Correct,
    Wrong,
    Neutral,
}

/// A resolved question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Zero-based question index.
    pub question: usize,
    /// `None` when the player gave no answer (empty submission or timeout).
    pub selected: Option<String>,
    pub correct_name: String,
    pub is_correct: bool,
}

impl AnswerRecord {
    /// The correct option is always shown as correct; a wrong pick as wrong.
    #[must_use]
    pub fn highlight(&self, option_name: &str) -> Highlight {
        if option_name == self.correct_name {
            Highlight::Correct
        } else if self.selected.as_deref() == Some(option_name) {
            Highlight::Wrong
        } else {
            Highlight::Neutral
        }
    }
}

/// State changes a quiz reports to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    QuestionStarted {
        /// One-based question number.
        number: usize,
        total: u32,
        glyph: String,
        options: Vec<String>,
        seconds: u32,
    },
    Tick {
        number: usize,
        remaining: u32,
    },
    TimeUp {
        number: usize,
    },
    Answered {
        record: AnswerRecord,
        score: u32,
    },
    Finished(QuizResult),
}

/// Receives quiz events as they happen.
pub trait QuizObserver {
    fn on_event(&mut self, event: &QuizEvent);
}

impl<F> QuizObserver for F
where
    F: FnMut(&QuizEvent),
{
    fn on_event(&mut self, event: &QuizEvent) {
        self(event);
    }
}
