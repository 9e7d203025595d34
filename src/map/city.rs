//! City records.

use super::commodity::CommodityId;
use super::region::Region;
use super::route::RouteId;

/// Dense index of a city within a `GameMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityId(pub u16);

impl CityId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable reference data for one city on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub key: String,
    pub region: Region,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Commodities this city supplies, sorted by id.
    pub commodities: Vec<CommodityId>,
    pub large: bool,
    pub west_coast: bool,
    pub near_east_coast: bool,
    pub near_west_coast: bool,
    /// Every route touching this city.
    pub routes: Vec<RouteId>,
}

impl City {
    /// Returns true if the city supplies at least one commodity.
    pub fn has_commodities(&self) -> bool {
        !self.commodities.is_empty()
    }

    /// Returns true if the city supplies the given commodity.
    pub fn supplies(&self, commodity: CommodityId) -> bool {
        self.commodities.binary_search(&commodity).is_ok()
    }
}
