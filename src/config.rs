//! Tunable parameters for contract generation.
//!
//! Defaults reproduce the standard rules. Any subset of fields can be
//! overridden from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::geo::Direction;

/// Relative draw weight for each compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionWeights {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl DirectionWeights {
    pub const fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        DirectionWeights {
            north,
            east,
            south,
            west,
        }
    }

    /// Even split between east and west.
    pub const EAST_WEST: DirectionWeights = DirectionWeights::new(0.0, 1.0, 0.0, 1.0);

    /// Even split between north and south.
    pub const NORTH_SOUTH: DirectionWeights = DirectionWeights::new(1.0, 0.0, 1.0, 0.0);

    pub const fn get(&self, direction: Direction) -> f64 {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// Parameters shared by all generation algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Hop radius around the reference cities for destination candidates.
    pub candidate_hops: u32,
    /// Hop radius around active cities for the commodity pool.
    pub commodity_hops: u32,
    /// Private offers per batch before upgrades.
    pub base_offers: usize,
    /// Attempt ceiling for one offer batch.
    pub offer_attempts: usize,
    /// Minimum hops from a market destination to the nearest producer.
    pub min_market_hops: u32,
    /// Weights when the reference city is near neither coast.
    pub balanced_weights: DirectionWeights,
    /// Weights when the reference city is near the east coast (biased west).
    pub near_east_coast_weights: DirectionWeights,
    /// Weights when the reference city is near the west coast (biased east).
    pub near_west_coast_weights: DirectionWeights,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            candidate_hops: 2,
            commodity_hops: 1,
            base_offers: 2,
            offer_attempts: 50,
            min_market_hops: 2,
            balanced_weights: DirectionWeights::new(3.0, 7.0, 3.0, 7.0),
            near_east_coast_weights: DirectionWeights::new(3.0, 3.0, 3.0, 11.0),
            near_west_coast_weights: DirectionWeights::new(3.0, 11.0, 3.0, 3.0),
        }
    }
}

impl GenerationConfig {
    /// Parses a configuration from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<GenerationConfig, serde_json::Error> {
        serde_json::from_str(json)
    }
}
