//! Direction buckets for destination candidates.
//!
//! Candidates are sorted into north/east/south/west buckets by their bearing
//! from one or more reference cities. An empty bucket borrows the contents of
//! its opposite bucket before any direction is drawn, so a drawn direction
//! only dead-ends when its whole axis is empty.

use rand::Rng;

use super::draw::pick_weighted;
use crate::config::DirectionWeights;
use crate::geo::{cardinal_direction, Direction, ALL_DIRECTIONS};
use crate::map::{CityId, CitySet, GameMap};

/// Candidate cities grouped by compass direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionBuckets {
    buckets: [Vec<CityId>; 4],
}

impl DirectionBuckets {
    /// Buckets each candidate by its direction from every reference city.
    ///
    /// With several references a candidate may land in more than one bucket,
    /// but appears at most once per bucket. Bucket order follows candidate order.
    pub fn from_references(map: &GameMap, references: &[CityId], candidates: &CitySet) -> Self {
        let mut out = DirectionBuckets::default();
        for &candidate in candidates {
            for &reference in references {
                let Some(direction) = cardinal_direction(map, reference, candidate) else {
                    continue;
                };
                let bucket = &mut out.buckets[direction as usize];
                if bucket.last() != Some(&candidate) {
                    bucket.push(candidate);
                }
            }
        }
        out
    }

    pub fn get(&self, direction: Direction) -> &[CityId] {
        &self.buckets[direction as usize]
    }

    pub fn is_empty(&self, direction: Direction) -> bool {
        self.buckets[direction as usize].is_empty()
    }

    /// Returns true if both `direction` and its opposite are empty.
    pub fn axis_is_empty(&self, direction: Direction) -> bool {
        self.is_empty(direction) && self.is_empty(direction.opposite())
    }

    /// Replaces each empty bucket with a copy of its opposite.
    pub fn fill_from_opposites(&mut self) {
        let original = self.buckets.clone();
        for d in ALL_DIRECTIONS {
            if original[d as usize].is_empty() {
                self.buckets[d as usize] = original[d.opposite() as usize].clone();
            }
        }
    }

    /// Draws a direction by weight among non-empty buckets.
    pub fn choose(&self, weights: &DirectionWeights, rng: &mut impl Rng) -> Option<Direction> {
        let items: Vec<(Direction, f64)> = ALL_DIRECTIONS
            .iter()
            .filter(|d| !self.is_empty(**d))
            .map(|d| (*d, weights.get(*d)))
            .collect();
        pick_weighted(&items, rng)
    }
}
