//! The built-in North American rail map.
//!
//! City and route data is stored in compile-time static tables and turned
//! into a `GameMap` on first access. City ids follow table order.

use std::sync::LazyLock;

use super::dataset::{CityDefinition, GameMap, MapDefinition, RouteDefinition};
use super::region::Region;

/// The number of cities on the standard map.
pub const STANDARD_CITY_COUNT: usize = 58;

/// The number of routes on the standard map.
pub const STANDARD_ROUTE_COUNT: usize = 92;

const LARGE: u8 = 1;
const WEST: u8 = 1 << 1;
const NEAR_EAST: u8 = 1 << 2;
const NEAR_WEST: u8 = 1 << 3;

/// Static metadata for a standard-map city.
pub struct StandardCity {
    pub key: &'static str,
    pub region: Region,
    pub latitude: f64,
    pub longitude: f64,
    pub commodities: &'static [&'static str],
    flags: u8,
}

impl StandardCity {
    pub const fn large(&self) -> bool {
        self.flags & LARGE != 0
    }

    pub const fn west_coast(&self) -> bool {
        self.flags & WEST != 0
    }

    pub const fn near_east_coast(&self) -> bool {
        self.flags & NEAR_EAST != 0
    }

    pub const fn near_west_coast(&self) -> bool {
        self.flags & NEAR_WEST != 0
    }
}

/// Static metadata for a standard-map route.
pub struct StandardRoute {
    pub from: &'static str,
    pub to: &'static str,
    pub mountainous: bool,
}

/// Shorthand constructors (used only in table construction).
const fn city(
    key: &'static str,
    region: Region,
    latitude: f64,
    longitude: f64,
    commodities: &'static [&'static str],
    flags: u8,
) -> StandardCity {
    StandardCity {
        key,
        region,
        latitude,
        longitude,
        commodities,
        flags,
    }
}
const fn rail(from: &'static str, to: &'static str) -> StandardRoute {
    StandardRoute {
        from,
        to,
        mountainous: false,
    }
}
const fn mountain(from: &'static str, to: &'static str) -> StandardRoute {
    StandardRoute {
        from,
        to,
        mountainous: true,
    }
}

use Region::*;

/// All standard-map cities, grouped by region.
pub static STANDARD_CITIES: [StandardCity; STANDARD_CITY_COUNT] = [
    // Northwest
    city("seattle", NorthWest, 47.61, -122.33, &["fish", "lumber"], LARGE | WEST | NEAR_WEST),
    city("portland", NorthWest, 45.52, -122.68, &["fruit", "lumber"], WEST | NEAR_WEST),
    city("spokane", NorthWest, 47.66, -117.43, &["lumber", "wheat"], NEAR_WEST),
    city("boise", NorthWest, 43.62, -116.20, &["cattle", "potatoes"], 0),
    city("helena", NorthWest, 46.59, -112.04, &["copper", "silver"], 0),
    city("billings", NorthWest, 45.78, -108.50, &["cattle", "coal"], 0),
    city("salt_lake_city", NorthWest, 40.76, -111.89, &["copper", "salt"], LARGE),
    // Southwest
    city("sacramento", SouthWest, 38.58, -121.49, &["fruit", "gold"], NEAR_WEST),
    city("san_francisco", SouthWest, 37.77, -122.42, &["fish", "wine"], LARGE | WEST | NEAR_WEST),
    city("los_angeles", SouthWest, 34.05, -118.24, &["fruit", "oil"], LARGE | WEST | NEAR_WEST),
    city("san_diego", SouthWest, 32.72, -117.16, &["fish"], WEST | NEAR_WEST),
    city("reno", SouthWest, 39.53, -119.81, &["gold", "silver"], NEAR_WEST),
    city("las_vegas", SouthWest, 36.17, -115.14, &[], 0),
    city("phoenix", SouthWest, 33.45, -112.07, &["copper"], 0),
    city("tucson", SouthWest, 32.22, -110.97, &["cattle", "copper"], 0),
    city("albuquerque", SouthWest, 35.08, -106.65, &["cattle"], 0),
    city("denver", SouthWest, 39.74, -104.99, &["cattle", "gold"], LARGE),
    city("el_paso", SouthWest, 31.76, -106.49, &["silver"], 0),
    // North central
    city("minneapolis", NorthCentral, 44.98, -93.27, &["wheat"], LARGE),
    city("duluth", NorthCentral, 46.79, -92.10, &["iron"], 0),
    city("fargo", NorthCentral, 46.88, -96.79, &["sugar", "wheat"], 0),
    city("bismarck", NorthCentral, 46.81, -100.78, &["coal", "wheat"], 0),
    city("rapid_city", NorthCentral, 44.08, -103.23, &["gold"], 0),
    city("omaha", NorthCentral, 41.26, -95.93, &["cattle", "corn"], 0),
    city("des_moines", NorthCentral, 41.59, -93.62, &["corn"], 0),
    city("chicago", NorthCentral, 41.88, -87.63, &["machinery", "steel"], LARGE),
    city("milwaukee", NorthCentral, 43.04, -87.91, &["machinery"], 0),
    city("kansas_city", NorthCentral, 39.10, -94.58, &["cattle"], LARGE),
    // Northeast
    city("detroit", NorthEast, 42.33, -83.05, &["lumber", "machinery"], LARGE),
    city("cleveland", NorthEast, 41.50, -81.69, &["iron", "steel"], 0),
    city("pittsburgh", NorthEast, 40.44, -79.99, &["coal", "steel"], LARGE),
    city("buffalo", NorthEast, 42.89, -78.88, &["wheat"], 0),
    city("albany", NorthEast, 42.65, -73.76, &[], NEAR_EAST),
    city("new_york", NorthEast, 40.71, -74.01, &["textiles"], LARGE | NEAR_EAST),
    city("boston", NorthEast, 42.36, -71.06, &["fish", "textiles"], LARGE | NEAR_EAST),
    city("philadelphia", NorthEast, 39.95, -75.17, &["machinery", "textiles"], LARGE | NEAR_EAST),
    city("washington", NorthEast, 38.91, -77.04, &[], NEAR_EAST),
    // South central
    city("wichita", SouthCentral, 37.69, -97.34, &["oil", "wheat"], 0),
    city("oklahoma_city", SouthCentral, 35.47, -97.52, &["cattle", "oil"], 0),
    city("dallas", SouthCentral, 32.78, -96.80, &["cattle", "cotton"], LARGE),
    city("houston", SouthCentral, 29.76, -95.37, &["oil"], LARGE),
    city("san_antonio", SouthCentral, 29.42, -98.49, &["cattle"], 0),
    city("little_rock", SouthCentral, 34.75, -92.29, &["cotton", "lumber"], 0),
    city("memphis", SouthCentral, 35.15, -90.05, &["cotton"], 0),
    city("new_orleans", SouthCentral, 29.95, -90.07, &["sugar"], LARGE),
    city("st_louis", SouthCentral, 38.63, -90.20, &["lead"], LARGE),
    // Southeast
    city("louisville", SouthEast, 38.25, -85.76, &["coal", "tobacco"], 0),
    city("nashville", SouthEast, 36.16, -86.78, &["tobacco"], 0),
    city("birmingham", SouthEast, 33.52, -86.80, &["coal", "iron", "steel"], 0),
    city("atlanta", SouthEast, 33.75, -84.39, &["cotton", "textiles"], LARGE),
    city("charlotte", SouthEast, 35.23, -80.84, &["textiles"], 0),
    city("richmond", SouthEast, 37.54, -77.44, &["cotton", "tobacco"], NEAR_EAST),
    city("norfolk", SouthEast, 36.85, -76.29, &["fish"], NEAR_EAST),
    city("charleston", SouthEast, 32.78, -79.93, &["cotton", "fish"], NEAR_EAST),
    city("savannah", SouthEast, 32.08, -81.09, &["cotton", "lumber"], NEAR_EAST),
    city("jacksonville", SouthEast, 30.33, -81.66, &["fruit", "lumber"], NEAR_EAST),
    city("tampa", SouthEast, 27.95, -82.46, &["fruit"], 0),
    city("miami", SouthEast, 25.76, -80.19, &["fruit", "sugar"], NEAR_EAST),
];

/// All standard-map routes. Mountain crossings follow the Cascades, Sierra
/// Nevada, Rockies, and Appalachians.
pub static STANDARD_ROUTES: [StandardRoute; STANDARD_ROUTE_COUNT] = [
    // Pacific Northwest
    rail("seattle", "portland"),
    mountain("seattle", "spokane"),
    rail("portland", "boise"),
    mountain("portland", "sacramento"),
    rail("spokane", "boise"),
    mountain("spokane", "helena"),
    rail("helena", "billings"),
    rail("boise", "salt_lake_city"),
    rail("billings", "bismarck"),
    rail("billings", "rapid_city"),
    rail("billings", "denver"),
    // Great Basin and California
    mountain("salt_lake_city", "reno"),
    mountain("salt_lake_city", "denver"),
    rail("salt_lake_city", "las_vegas"),
    mountain("reno", "sacramento"),
    rail("sacramento", "san_francisco"),
    rail("san_francisco", "los_angeles"),
    rail("los_angeles", "san_diego"),
    rail("los_angeles", "las_vegas"),
    rail("los_angeles", "phoenix"),
    rail("san_diego", "tucson"),
    rail("phoenix", "tucson"),
    rail("tucson", "el_paso"),
    mountain("phoenix", "albuquerque"),
    rail("albuquerque", "el_paso"),
    mountain("albuquerque", "denver"),
    rail("el_paso", "san_antonio"),
    // Plains
    rail("denver", "kansas_city"),
    rail("denver", "omaha"),
    rail("denver", "rapid_city"),
    rail("rapid_city", "bismarck"),
    rail("bismarck", "fargo"),
    rail("fargo", "minneapolis"),
    rail("fargo", "duluth"),
    rail("duluth", "minneapolis"),
    rail("minneapolis", "milwaukee"),
    rail("minneapolis", "des_moines"),
    rail("omaha", "des_moines"),
    rail("omaha", "kansas_city"),
    rail("des_moines", "chicago"),
    rail("milwaukee", "chicago"),
    rail("kansas_city", "st_louis"),
    rail("kansas_city", "wichita"),
    rail("kansas_city", "des_moines"),
    rail("wichita", "oklahoma_city"),
    rail("wichita", "denver"),
    rail("albuquerque", "oklahoma_city"),
    // Texas and the lower Mississippi
    rail("oklahoma_city", "dallas"),
    rail("oklahoma_city", "little_rock"),
    rail("dallas", "houston"),
    rail("dallas", "san_antonio"),
    rail("dallas", "el_paso"),
    rail("houston", "san_antonio"),
    rail("houston", "new_orleans"),
    rail("dallas", "little_rock"),
    rail("little_rock", "memphis"),
    rail("memphis", "st_louis"),
    rail("memphis", "nashville"),
    rail("memphis", "new_orleans"),
    rail("memphis", "birmingham"),
    rail("new_orleans", "birmingham"),
    rail("st_louis", "chicago"),
    rail("st_louis", "louisville"),
    // Great Lakes and the Northeast
    rail("chicago", "detroit"),
    rail("chicago", "louisville"),
    rail("detroit", "cleveland"),
    rail("cleveland", "pittsburgh"),
    rail("cleveland", "buffalo"),
    rail("buffalo", "albany"),
    rail("albany", "boston"),
    rail("albany", "new_york"),
    rail("boston", "new_york"),
    rail("new_york", "philadelphia"),
    mountain("pittsburgh", "philadelphia"),
    rail("philadelphia", "washington"),
    mountain("pittsburgh", "washington"),
    rail("louisville", "pittsburgh"),
    // Southeast
    rail("washington", "richmond"),
    rail("richmond", "norfolk"),
    rail("richmond", "charlotte"),
    mountain("louisville", "richmond"),
    rail("louisville", "nashville"),
    mountain("nashville", "atlanta"),
    rail("nashville", "birmingham"),
    rail("birmingham", "atlanta"),
    rail("atlanta", "charlotte"),
    rail("atlanta", "savannah"),
    rail("charlotte", "charleston"),
    rail("charleston", "savannah"),
    rail("savannah", "jacksonville"),
    rail("jacksonville", "tampa"),
    rail("tampa", "miami"),
];

/// Returns the standard map definition built from the static tables.
pub fn standard_definition() -> MapDefinition {
    let cities = STANDARD_CITIES
        .iter()
        .map(|c| CityDefinition {
            key: c.key.to_string(),
            region: c.region,
            latitude: c.latitude,
            longitude: c.longitude,
            commodities: c.commodities.iter().map(|s| s.to_string()).collect(),
            large: c.large(),
            west_coast: c.west_coast(),
            near_east_coast: c.near_east_coast(),
            near_west_coast: c.near_west_coast(),
        })
        .collect();
    let routes = STANDARD_ROUTES
        .iter()
        .map(|r| RouteDefinition {
            key: None,
            cities: [r.from.to_string(), r.to.to_string()],
            mountainous: r.mountainous,
        })
        .collect();
    MapDefinition { cities, routes }
}

static STANDARD_MAP: LazyLock<GameMap> = LazyLock::new(|| {
    GameMap::from_definition(standard_definition()).expect("standard map tables are valid")
});

/// Returns the standard map, building it on first access.
#[inline]
pub fn standard_map() -> &'static GameMap {
    &STANDARD_MAP
}
