//! Route records: undirected edges between two cities.

use super::city::CityId;

/// Dense index of a route within a `GameMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(pub u16);

impl RouteId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A route connecting exactly two distinct cities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub key: String,
    pub cities: [CityId; 2],
    pub mountainous: bool,
}

impl Route {
    /// Returns the endpoint opposite `city`, or None if `city` is not on this route.
    pub fn other_end(&self, city: CityId) -> Option<CityId> {
        match self.cities {
            [a, b] if a == city => Some(b),
            [a, b] if b == city => Some(a),
            _ => None,
        }
    }
}
