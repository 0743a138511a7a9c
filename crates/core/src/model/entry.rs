use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("entry name cannot be empty")]
    EmptyName,

    #[error("entry glyph cannot be empty")]
    EmptyGlyph,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PoolError {
    #[error("duplicate entry name in pool: {name}")]
    DuplicateName { name: String },
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// A single quiz item: a country name and its flag glyph.
///
/// The name doubles as the identity of the entry and is what answers are
/// compared against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    name: String,
    glyph: String,
}

impl Entry {
    /// Create a validated entry. The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyName` or `EntryError::EmptyGlyph` for blank input.
    pub fn new(name: impl Into<String>, glyph: impl Into<String>) -> Result<Self, EntryError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }
        let glyph = glyph.into();
        if glyph.trim().is_empty() {
            return Err(EntryError::EmptyGlyph);
        }
        Ok(Self {
            name: name.to_owned(),
            glyph,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Exact, case-sensitive comparison against a submitted answer.
    #[must_use]
    pub fn is_named(&self, answer: &str) -> bool {
        self.name == answer
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.glyph, self.name)
    }
}

//
// ─── POOL ──────────────────────────────────────────────────────────────────────
//

/// Candidate pool for a quiz: entries with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPool {
    entries: Vec<Entry>,
}

impl EntryPool {
    /// Build a pool, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::DuplicateName` on the first repeated name.
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Result<Self, PoolError> {
        let entries: Vec<Entry> = entries.into_iter().collect();
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name()) {
                return Err(PoolError::DuplicateName {
                    name: entry.name().to_owned(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a pool keeping the first occurrence of every name.
    ///
    /// Used when merging regions whose lists overlap.
    #[must_use]
    pub fn from_unique(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.name().to_owned()))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.is_named(name))
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> Entry {
        Entry::new(name, "🏳").unwrap()
    }

    #[test]
    fn entry_trims_name_and_rejects_blank() {
        let e = Entry::new("  Germany ", "🇩🇪").unwrap();
        assert_eq!(e.name(), "Germany");
        assert_eq!(Entry::new("   ", "🇩🇪").unwrap_err(), EntryError::EmptyName);
        assert_eq!(Entry::new("France", "").unwrap_err(), EntryError::EmptyGlyph);
    }

    #[test]
    fn name_match_is_exact() {
        let e = entry("Chad");
        assert!(e.is_named("Chad"));
        assert!(!e.is_named("chad"));
        assert!(!e.is_named("Chad "));
        assert!(!e.is_named(""));
    }

    #[test]
    fn pool_rejects_duplicates() {
        let err = EntryPool::new(vec![entry("A"), entry("B"), entry("A")]).unwrap_err();
        assert_eq!(err, PoolError::DuplicateName { name: "A".into() });
    }

    #[test]
    fn from_unique_keeps_first_occurrence() {
        let first = Entry::new("Russia", "first").unwrap();
        let second = Entry::new("Russia", "second").unwrap();
        let pool = EntryPool::from_unique(vec![first.clone(), entry("Chile"), second]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get("Russia"), Some(&first));
    }
}
