//! The read-only map dataset.
//!
//! A `GameMap` owns every city, route, and commodity and addresses them by
//! dense ids. Maps are assembled with `GameMapBuilder` (or loaded from JSON
//! definitions) and validated once at build time, so lookups afterwards only
//! need to handle ids that did not come from this map.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::city::{City, CityId};
use super::commodity::{Commodity, CommodityId};
use super::region::{Region, RegionSet};
use super::route::{Route, RouteId};
use crate::error::MapError;

/// Serialized form of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDefinition {
    pub key: String,
    pub region: Region,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub commodities: Vec<String>,
    #[serde(default)]
    pub large: bool,
    #[serde(default)]
    pub west_coast: bool,
    #[serde(default)]
    pub near_east_coast: bool,
    #[serde(default)]
    pub near_west_coast: bool,
}

impl CityDefinition {
    /// Creates a plain city with no commodities and no flags.
    pub fn new(key: &str, region: Region, latitude: f64, longitude: f64) -> Self {
        CityDefinition {
            key: key.to_string(),
            region,
            latitude,
            longitude,
            commodities: Vec::new(),
            large: false,
            west_coast: false,
            near_east_coast: false,
            near_west_coast: false,
        }
    }

    pub fn supplying(mut self, commodities: &[&str]) -> Self {
        self.commodities = commodities.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn large(mut self) -> Self {
        self.large = true;
        self
    }

    pub fn west_coast(mut self) -> Self {
        self.west_coast = true;
        self
    }

    pub fn near_east_coast(mut self) -> Self {
        self.near_east_coast = true;
        self
    }

    pub fn near_west_coast(mut self) -> Self {
        self.near_west_coast = true;
        self
    }
}

/// Serialized form of a route. The key defaults to `"<a>-<b>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    #[serde(default)]
    pub key: Option<String>,
    pub cities: [String; 2],
    #[serde(default)]
    pub mountainous: bool,
}

/// Serialized form of a whole map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub cities: Vec<CityDefinition>,
    pub routes: Vec<RouteDefinition>,
}

/// Accumulates city and route definitions and validates them into a `GameMap`.
#[derive(Debug, Clone, Default)]
pub struct GameMapBuilder {
    def: MapDefinition,
}

impl GameMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: CityDefinition) -> Self {
        self.def.cities.push(city);
        self
    }

    pub fn route(mut self, a: &str, b: &str, mountainous: bool) -> Self {
        self.def.routes.push(RouteDefinition {
            key: None,
            cities: [a.to_string(), b.to_string()],
            mountainous,
        });
        self
    }

    pub fn build(self) -> Result<GameMap, MapError> {
        GameMap::from_definition(self.def)
    }
}

/// Immutable map of cities, routes, and commodities.
#[derive(Debug, Clone)]
pub struct GameMap {
    cities: Vec<City>,
    routes: Vec<Route>,
    commodities: Vec<Commodity>,
    city_index: HashMap<String, CityId>,
    commodity_index: HashMap<String, CommodityId>,
}

impl GameMap {
    /// Parses and validates a JSON map definition.
    pub fn from_json(json: &str) -> Result<GameMap, MapError> {
        let def: MapDefinition = serde_json::from_str(json)?;
        GameMap::from_definition(def)
    }

    /// Validates a map definition and assigns ids.
    ///
    /// City ids follow definition order. Commodity ids follow key order.
    pub fn from_definition(def: MapDefinition) -> Result<GameMap, MapError> {
        let limit = u16::MAX as usize;
        if def.cities.len() > limit || def.routes.len() > limit {
            return Err(MapError::TooLarge(limit));
        }

        let mut city_index = HashMap::with_capacity(def.cities.len());
        for (i, c) in def.cities.iter().enumerate() {
            if !valid_coordinates(c.latitude, c.longitude) {
                return Err(MapError::InvalidCoordinates(c.key.clone()));
            }
            if city_index.insert(c.key.clone(), CityId(i as u16)).is_some() {
                return Err(MapError::DuplicateCity(c.key.clone()));
            }
        }

        // Commodity ids in key order so that ids are stable across definition shuffles.
        let mut commodity_keys: BTreeMap<&str, CommodityId> = BTreeMap::new();
        for c in &def.cities {
            for k in &c.commodities {
                commodity_keys.entry(k.as_str()).or_insert(CommodityId(0));
            }
        }
        if commodity_keys.len() > limit {
            return Err(MapError::TooLarge(limit));
        }
        for (i, id) in commodity_keys.values_mut().enumerate() {
            *id = CommodityId(i as u16);
        }

        let mut commodities: Vec<Commodity> = commodity_keys
            .keys()
            .map(|k| Commodity {
                key: k.to_string(),
                regions: RegionSet::empty(),
                cities: Vec::new(),
            })
            .collect();

        let mut cities: Vec<City> = Vec::with_capacity(def.cities.len());
        for (i, c) in def.cities.iter().enumerate() {
            let mut supplied: Vec<CommodityId> =
                c.commodities.iter().map(|k| commodity_keys[k.as_str()]).collect();
            supplied.sort();
            supplied.dedup();
            for &cid in &supplied {
                let commodity = &mut commodities[cid.index()];
                commodity.regions.insert(c.region);
                commodity.cities.push(CityId(i as u16));
            }
            cities.push(City {
                key: c.key.clone(),
                region: c.region,
                latitude: c.latitude,
                longitude: c.longitude,
                commodities: supplied,
                large: c.large,
                west_coast: c.west_coast,
                near_east_coast: c.near_east_coast,
                near_west_coast: c.near_west_coast,
                routes: Vec::new(),
            });
        }

        let mut routes: Vec<Route> = Vec::with_capacity(def.routes.len());
        let mut route_keys: HashSet<String> = HashSet::with_capacity(def.routes.len());
        let mut pairs: HashSet<(CityId, CityId)> = HashSet::with_capacity(def.routes.len());
        for r in def.routes {
            let [a_key, b_key] = &r.cities;
            let key = r.key.clone().unwrap_or_else(|| format!("{}-{}", a_key, b_key));
            let lookup = |city: &String| {
                city_index
                    .get(city)
                    .copied()
                    .ok_or_else(|| MapError::UnknownRouteCity {
                        route: key.clone(),
                        city: city.clone(),
                    })
            };
            let a = lookup(a_key)?;
            let b = lookup(b_key)?;
            if a == b {
                return Err(MapError::SelfLoop(key));
            }
            if !pairs.insert((a.min(b), a.max(b))) {
                return Err(MapError::DuplicateRoute(a_key.clone(), b_key.clone()));
            }
            if !route_keys.insert(key.clone()) {
                return Err(MapError::DuplicateRouteKey(key));
            }
            let id = RouteId(routes.len() as u16);
            cities[a.index()].routes.push(id);
            cities[b.index()].routes.push(id);
            routes.push(Route {
                key,
                cities: [a, b],
                mountainous: r.mountainous,
            });
        }

        let commodity_index = commodities
            .iter()
            .enumerate()
            .map(|(i, c)| (c.key.clone(), CommodityId(i as u16)))
            .collect();

        Ok(GameMap {
            cities,
            routes,
            commodities,
            city_index,
            commodity_index,
        })
    }

    #[inline]
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id.index())
    }

    #[inline]
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.index())
    }

    #[inline]
    pub fn commodity(&self, id: CommodityId) -> Option<&Commodity> {
        self.commodities.get(id.index())
    }

    /// Looks up a city by its key.
    pub fn city_id(&self, key: &str) -> Option<CityId> {
        self.city_index.get(key).copied()
    }

    /// Looks up a commodity by its key.
    pub fn commodity_id(&self, key: &str) -> Option<CommodityId> {
        self.commodity_index.get(key).copied()
    }

    /// Returns the key of a city, or `"?"` for ids outside this map.
    pub fn city_key(&self, id: CityId) -> &str {
        self.city(id).map_or("?", |c| c.key.as_str())
    }

    /// Returns the key of a commodity, or `"?"` for ids outside this map.
    pub fn commodity_key(&self, id: CommodityId) -> &str {
        self.commodity(id).map_or("?", |c| c.key.as_str())
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// All city ids in index order.
    pub fn city_ids(&self) -> impl Iterator<Item = CityId> {
        (0..self.cities.len() as u16).map(CityId)
    }

    /// All commodity ids in index order.
    pub fn commodity_ids(&self) -> impl Iterator<Item = CommodityId> {
        (0..self.commodities.len() as u16).map(CommodityId)
    }

    /// Iterates `(route, neighbor)` for every route touching `city`.
    /// Yields nothing for an unknown city.
    pub fn neighbors(&self, city: CityId) -> impl Iterator<Item = (&Route, CityId)> + '_ {
        self.city(city)
            .map(|c| c.routes.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&rid| {
                let route = self.route(rid)?;
                route.other_end(city).map(|other| (route, other))
            })
    }

    /// Returns true if `city` supplies `commodity`. Unknown ids supply nothing.
    pub fn supplies(&self, city: CityId, commodity: CommodityId) -> bool {
        self.city(city).is_some_and(|c| c.supplies(commodity))
    }
}

fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}
