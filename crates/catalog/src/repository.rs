use async_trait::async_trait;
use quiz_core::model::{Entry, EntryError, EntryPool, PoolError, Region};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("no data for region {0}")]
    NotFound(Region),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed region data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

/// Read-only source of candidate pools.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Load the entries of a single data-backed region.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the region has no data set, or other
    /// source errors.
    async fn region_entries(&self, region: Region) -> Result<Vec<Entry>, CatalogError>;

    /// Load the candidate pool for a region.
    ///
    /// `Region::WholeWorld` merges every other region, skipping missing ones and
    /// keeping the first entry when a name appears in more than one region.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for a missing single region or malformed data.
    async fn load_pool(&self, region: Region) -> Result<EntryPool, CatalogError> {
        if !region.is_whole_world() {
            let entries = self.region_entries(region).await?;
            return Ok(EntryPool::new(entries)?);
        }

        let mut all = Vec::new();
        for component in Region::components() {
            match self.region_entries(component).await {
                Ok(entries) => all.extend(entries),
                Err(CatalogError::NotFound(missing)) => {
                    log::warn!("skipping region without data: {missing}");
                }
                Err(err) => return Err(err),
            }
        }
        let pool = EntryPool::from_unique(all);
        log::debug!("merged whole-world pool with {} entries", pool.len());
        Ok(pool)
    }
}

/// Simple in-memory catalog for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    regions: Arc<Mutex<HashMap<Region, Vec<Entry>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the data set for a region.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Poisoned` if the lock is poisoned.
    pub fn insert_region(
        &self,
        region: Region,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<(), CatalogError> {
        let mut guard = self
            .regions
            .lock()
            .map_err(|e| CatalogError::Poisoned(e.to_string()))?;
        guard.insert(region, entries.into_iter().collect());
        Ok(())
    }
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn region_entries(&self, region: Region) -> Result<Vec<Entry>, CatalogError> {
        let guard = self
            .regions
            .lock()
            .map_err(|e| CatalogError::Poisoned(e.to_string()))?;
        guard
            .get(&region)
            .cloned()
            .ok_or(CatalogError::NotFound(region))
    }
}
