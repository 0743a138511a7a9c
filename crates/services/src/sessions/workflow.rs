use std::sync::Arc;

use catalog::EntryRepository;
use quiz_core::model::{EntryPool, QuizSettings, Region, SettingsCatalog};
use tokio::sync::mpsc;

use super::events::QuizObserver;
use super::runner::{PlayerInput, QuizRunner, RunOutcome};
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Orchestrates loading a region's pool and starting or playing a quiz on it.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    entries: Arc<dyn EntryRepository>,
    settings_catalog: SettingsCatalog,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, entries: Arc<dyn EntryRepository>) -> Self {
        Self {
            clock,
            entries,
            settings_catalog: SettingsCatalog::standard(),
        }
    }

    #[must_use]
    pub fn with_settings_catalog(mut self, settings_catalog: SettingsCatalog) -> Self {
        self.settings_catalog = settings_catalog;
        self
    }

    #[must_use]
    pub fn settings_catalog(&self) -> &SettingsCatalog {
        &self.settings_catalog
    }

    /// Load the candidate pool for a region.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the region cannot be loaded.
    pub async fn load_pool(&self, region: Region) -> Result<EntryPool, SessionError> {
        Ok(self.entries.load_pool(region).await?)
    }

    /// Start a new session for the region.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for catalog failures or undersized pools.
    pub async fn start_session(
        &self,
        region: Region,
        settings: QuizSettings,
    ) -> Result<QuizSession, SessionError> {
        let pool = self.load_pool(region).await?;
        log::debug!("starting {region} quiz from {} entries", pool.len());
        QuizSession::start(settings, &pool, self.clock.now())
    }

    /// Start a session from raw settings-screen values, snapped to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for catalog failures or undersized pools.
    pub async fn start_session_with_choices(
        &self,
        region: Region,
        question_count: u32,
        seconds_per_question: u32,
    ) -> Result<QuizSession, SessionError> {
        let settings = self
            .settings_catalog
            .settings_for(question_count, seconds_per_question)?;
        self.start_session(region, settings).await
    }

    /// Start a session and drive it until it finishes or the player leaves.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for start failures or a stalled run.
    pub async fn play<O>(
        &self,
        region: Region,
        settings: QuizSettings,
        inputs: &mut mpsc::Receiver<PlayerInput>,
        observer: &mut O,
    ) -> Result<RunOutcome, SessionError>
    where
        O: QuizObserver + ?Sized,
    {
        let session = self.start_session(region, settings).await?;
        QuizRunner::new(self.clock).run(session, inputs, observer).await
    }
}
