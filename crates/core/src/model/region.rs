use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegionError {
    #[error("unknown region: {0}")]
    Unknown(String),
}

/// Scope a candidate pool is drawn from.
///
/// `WholeWorld` is not backed by its own data set; it is the union of every
/// other region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Whole World")]
    WholeWorld,
    Europe,
    Asia,
    Africa,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::WholeWorld,
        Region::Europe,
        Region::Asia,
        Region::Africa,
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Oceania,
    ];

    /// Display name, also the top-level key inside a region's data file.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Region::WholeWorld => "Whole World",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Africa => "Africa",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Oceania => "Oceania",
        }
    }

    /// File stem of the region's data file (`north_america` for `North America`).
    #[must_use]
    pub fn file_stem(self) -> String {
        self.name().to_lowercase().replace(' ', "_")
    }

    #[must_use]
    pub fn is_whole_world(self) -> bool {
        matches!(self, Region::WholeWorld)
    }

    /// Regions backed by a data set: every region except `WholeWorld`.
    pub fn components() -> impl Iterator<Item = Region> {
        Self::ALL.into_iter().filter(|r| !r.is_whole_world())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = RegionError;

    /// Accepts either the display name or the file stem, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.name().to_lowercase() == wanted || r.file_stem() == wanted)
            .ok_or_else(|| RegionError::Unknown(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stems_are_snake_case() {
        assert_eq!(Region::NorthAmerica.file_stem(), "north_america");
        assert_eq!(Region::Europe.file_stem(), "europe");
    }

    #[test]
    fn parses_names_and_stems() {
        assert_eq!("South America".parse::<Region>().unwrap(), Region::SouthAmerica);
        assert_eq!("south_america".parse::<Region>().unwrap(), Region::SouthAmerica);
        assert_eq!("whole world".parse::<Region>().unwrap(), Region::WholeWorld);
        assert!(matches!("Atlantis".parse::<Region>(), Err(RegionError::Unknown(_))));
    }

    #[test]
    fn components_exclude_whole_world() {
        let components: Vec<_> = Region::components().collect();
        assert_eq!(components.len(), 6);
        assert!(!components.contains(&Region::WholeWorld));
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Region::NorthAmerica).unwrap();
        assert_eq!(json, "\"North America\"");
    }
}
