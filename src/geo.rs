//! Compass bearings between cities.
//!
//! `heading` is the great-circle initial bearing; `cardinal_direction`
//! buckets it into one of four 90-degree wedges centred on the compass axes.

use crate::map::{CityId, GameMap};

/// A coarse compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// All directions in index order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Returns the direction 180 degrees away.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Buckets a heading in degrees. North wraps across 0.
    pub fn from_heading(degrees: f64) -> Direction {
        let h = degrees.rem_euclid(360.0);
        if !(45.0..315.0).contains(&h) {
            Direction::North
        } else if h < 135.0 {
            Direction::East
        } else if h < 225.0 {
            Direction::South
        } else {
            Direction::West
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

/// Great-circle initial bearing from one coordinate to another, in [0, 360).
pub fn bearing(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> f64 {
    let phi1 = from_lat.to_radians();
    let phi2 = to_lat.to_radians();
    let delta = (to_lon - from_lon).to_radians();
    let y = delta.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta.cos();
    let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

/// Returns the compass heading from `from` to `to`, or None if either city is unknown.
pub fn heading(map: &GameMap, from: CityId, to: CityId) -> Option<f64> {
    let (Some(a), Some(b)) = (map.city(from), map.city(to)) else {
        log::warn!("heading: unknown city in {:?} -> {:?}", from, to);
        return None;
    };
    Some(bearing(a.latitude, a.longitude, b.latitude, b.longitude))
}

/// Returns the cardinal direction from `from` to `to`, or None if either city is unknown.
pub fn cardinal_direction(map: &GameMap, from: CityId, to: CityId) -> Option<Direction> {
    heading(map, from, to).map(Direction::from_heading)
}
