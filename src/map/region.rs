//! Map regions.
//!
//! The map is divided into six regions on a 2x3 grid (north/south rows,
//! west/central/east columns). Regions locate cities and describe where a
//! commodity is produced.

use serde::{Deserialize, Serialize};

/// One of the six map regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Region {
    #[serde(rename = "NW")]
    NorthWest = 0,
    #[serde(rename = "NC")]
    NorthCentral = 1,
    #[serde(rename = "NE")]
    NorthEast = 2,
    #[serde(rename = "SW")]
    SouthWest = 3,
    #[serde(rename = "SC")]
    SouthCentral = 4,
    #[serde(rename = "SE")]
    SouthEast = 5,
}

/// The number of regions.
pub const REGION_COUNT: usize = 6;

/// All regions in index order.
pub const ALL_REGIONS: [Region; REGION_COUNT] = [
    Region::NorthWest,
    Region::NorthCentral,
    Region::NorthEast,
    Region::SouthWest,
    Region::SouthCentral,
    Region::SouthEast,
];

impl Region {
    /// Returns the two-letter region code.
    pub const fn code(self) -> &'static str {
        match self {
            Region::NorthWest => "NW",
            Region::NorthCentral => "NC",
            Region::NorthEast => "NE",
            Region::SouthWest => "SW",
            Region::SouthCentral => "SC",
            Region::SouthEast => "SE",
        }
    }

    /// Parses a region from its two-letter code.
    pub fn from_code(code: &str) -> Option<Region> {
        match code {
            "NW" => Some(Region::NorthWest),
            "NC" => Some(Region::NorthCentral),
            "NE" => Some(Region::NorthEast),
            "SW" => Some(Region::SouthWest),
            "SC" => Some(Region::SouthCentral),
            "SE" => Some(Region::SouthEast),
            _ => None,
        }
    }
}

/// A small set of regions stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegionSet(u8);

impl RegionSet {
    pub const fn empty() -> Self {
        RegionSet(0)
    }

    pub fn insert(&mut self, region: Region) {
        self.0 |= 1 << region as u8;
    }

    pub const fn contains(self, region: Region) -> bool {
        self.0 & (1 << region as u8) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the contained regions in index order.
    pub fn iter(self) -> impl Iterator<Item = Region> {
        ALL_REGIONS.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut set = RegionSet::empty();
        for r in iter {
            set.insert(r);
        }
        set
    }
}
