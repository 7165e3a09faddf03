/// Canonical marketplace region table
///
/// Region ids are stable wire/storage values and must never be renumbered.
/// Id 0 is reserved as the "all regions" sentinel used by aggregated metric
/// rows and is deliberately absent from this enum.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    RestOfWorld,
    Us,
    Uk,
    Br,
    Es,
    Co,
    Ve,
    Pl,
    Mx,
    Hu,
    De,
    Fr,
    It,
}

/// Sentinel region id meaning "aggregated across all regions".
pub const ALL_REGIONS_ID: i32 = 0;

impl Region {
    /// All regions, in id order.
    pub const ALL: &'static [Region] = &[
        Region::RestOfWorld,
        Region::Us,
        Region::Uk,
        Region::Br,
        Region::Es,
        Region::Co,
        Region::Ve,
        Region::Pl,
        Region::Mx,
        Region::Hu,
        Region::De,
        Region::Fr,
        Region::It,
    ];

    pub fn id(self) -> i32 {
        match self {
            Region::RestOfWorld => 1,
            Region::Us => 2,
            Region::Uk => 4,
            Region::Br => 7,
            Region::Es => 8,
            Region::Co => 9,
            Region::Ve => 10,
            Region::Pl => 11,
            Region::Mx => 12,
            Region::Hu => 13,
            Region::De => 14,
            Region::Fr => 21,
            Region::It => 22,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Region::RestOfWorld => "restofworld",
            Region::Us => "us",
            Region::Uk => "uk",
            Region::Br => "br",
            Region::Es => "es",
            Region::Co => "co",
            Region::Ve => "ve",
            Region::Pl => "pl",
            Region::Mx => "mx",
            Region::Hu => "hu",
            Region::De => "de",
            Region::Fr => "fr",
            Region::It => "it",
        }
    }

    /// Resolve a submitted region name to its canonical region.
    pub fn from_slug(slug: &str) -> Option<Region> {
        Region::ALL.iter().copied().find(|r| r.slug() == slug)
    }

    /// Resolve a stored region id.
    pub fn from_id(id: i32) -> Option<Region> {
        Region::ALL.iter().copied().find(|r| r.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_roundtrip() {
        for region in Region::ALL {
            assert_eq!(Region::from_slug(region.slug()), Some(*region));
            assert_eq!(Region::from_id(region.id()), Some(*region));
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert_eq!(Region::from_slug("atlantis"), None);
        assert_eq!(Region::from_slug("US"), None);
    }

    #[test]
    fn ids_are_unique_and_nonzero() {
        let mut seen = std::collections::HashSet::new();
        for region in Region::ALL {
            assert_ne!(region.id(), ALL_REGIONS_ID);
            assert!(seen.insert(region.id()), "duplicate id {}", region.id());
        }
    }
}
