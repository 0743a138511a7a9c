//! Shared error types for the services crate.

use thiserror::Error;

use catalog::CatalogError;
use quiz_core::model::{QuizResultError, SettingsError};

/// Errors emitted by quiz sessions and the services around them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("pool has {available} entries, at least {required} are needed to build options")]
    NotEnoughEntries { available: usize, required: usize },
    #[error("pool has {available} entries but {requested} questions were requested")]
    InsufficientQuestions { available: usize, requested: usize },
    #[error("session stopped before reaching a result")]
    Stalled,
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Result(#[from] QuizResultError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
