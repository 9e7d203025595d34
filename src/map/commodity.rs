//! Commodity records.
//!
//! Commodities are derived from the cities that supply them: the producing
//! city list and the region footprint are both computed when the map is built.

use super::city::CityId;
use super::region::RegionSet;

/// Dense index of a commodity within a `GameMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommodityId(pub u16);

impl CommodityId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tradeable good and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commodity {
    pub key: String,
    /// Union of the regions of every producing city.
    pub regions: RegionSet,
    /// Producing cities, sorted by id.
    pub cities: Vec<CityId>,
}
