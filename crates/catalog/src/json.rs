//! Region data files.
//!
//! Each region lives in `<dir>/<file_stem>.json` and holds a single object keyed
//! by the region's display name, mapping country names to flag glyphs:
//!
//! ```json
//! { "North America": { "Canada": "🇨🇦", "Mexico": "🇲🇽" } }
//! ```

use async_trait::async_trait;
use quiz_core::model::{Entry, Region};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::{CatalogError, EntryRepository};

type RegionDocument = HashMap<String, BTreeMap<String, String>>;

/// Parse one region file into entries, ordered by name.
///
/// A document without the region's key yields no entries.
///
/// # Errors
///
/// Returns `CatalogError::Json` for malformed JSON and `CatalogError::Entry`
/// for blank names or glyphs.
pub fn parse_region_document(region: Region, raw: &str) -> Result<Vec<Entry>, CatalogError> {
    let mut doc: RegionDocument = serde_json::from_str(raw)?;
    let Some(countries) = doc.remove(region.name()) else {
        log::warn!("region file for {region} has no \"{}\" key", region.name());
        return Ok(Vec::new());
    };

    countries
        .into_iter()
        .map(|(name, glyph)| Entry::new(name, glyph).map_err(CatalogError::from))
        .collect()
}

/// Catalog backed by a directory of region JSON files.
#[derive(Debug, Clone)]
pub struct JsonBundle {
    dir: PathBuf,
}

impl JsonBundle {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, region: Region) -> PathBuf {
        self.dir.join(format!("{}.json", region.file_stem()))
    }
}

#[async_trait]
impl EntryRepository for JsonBundle {
    async fn region_entries(&self, region: Region) -> Result<Vec<Entry>, CatalogError> {
        if region.is_whole_world() {
            return Err(CatalogError::NotFound(region));
        }
        let path = self.path_for(region);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(region));
            }
            Err(err) => return Err(err.into()),
        };
        let entries = parse_region_document(region, &raw)?;
        log::debug!("loaded {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }
}
