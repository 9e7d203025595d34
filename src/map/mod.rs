//! Map dataset and graph traversal.
//!
//! Contains the immutable city/route/commodity reference data, the built-in
//! standard map, and the breadth-first searches over the route graph.

pub mod city;
pub mod commodity;
pub mod dataset;
pub mod region;
pub mod route;
pub mod standard;
pub mod traverse;

pub use city::{City, CityId};
pub use commodity::{Commodity, CommodityId};
pub use dataset::{CityDefinition, GameMap, GameMapBuilder, MapDefinition, RouteDefinition};
pub use region::{Region, RegionSet, ALL_REGIONS, REGION_COUNT};
pub use route::{Route, RouteId};
pub use standard::{standard_map, STANDARD_CITIES, STANDARD_CITY_COUNT, STANDARD_ROUTES, STANDARD_ROUTE_COUNT};
pub use traverse::{any_route, cities_connected_to, no_mountains, shortest_distance, CitySet, MAX_SEARCH_DEPTH};
