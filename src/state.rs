//! Game-state snapshot consumed by the generation algorithms.
//!
//! The engine only reads this snapshot; callers own every mutation.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contract::model::Contract;
use crate::map::{CityId, Region};

/// Opaque player identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of a player the generation algorithms look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    /// Connected cities in the order they were added. The last one is current.
    pub active_cities: Vec<CityId>,
    pub hub_city: Option<CityId>,
    pub regional_office: Option<Region>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, active_cities: Vec<CityId>) -> Self {
        Player {
            id: id.into(),
            active_cities,
            hub_city: None,
            regional_office: None,
        }
    }

    /// The most recently added active city.
    pub fn current_city(&self) -> Option<CityId> {
        self.active_cities.last().copied()
    }
}

/// Players and contracts at one point in the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub players: Vec<Player>,
    pub contracts: Vec<Contract>,
}

impl GameState {
    pub fn new(players: Vec<Player>, contracts: Vec<Contract>) -> Self {
        GameState { players, contracts }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Union of every player's active cities, sorted and deduplicated.
    pub fn all_active_cities(&self) -> Vec<CityId> {
        let set: BTreeSet<CityId> = self
            .players
            .iter()
            .flat_map(|p| p.active_cities.iter().copied())
            .collect();
        set.into_iter().collect()
    }

    /// Returns true if any player has made `city` their hub.
    pub fn is_hub_city(&self, city: CityId) -> bool {
        self.players.iter().any(|p| p.hub_city == Some(city))
    }

    pub fn fulfilled_contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter().filter(|c| c.fulfilled)
    }
}
