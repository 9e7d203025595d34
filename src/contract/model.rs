//! Contract data types.

use serde::{Deserialize, Serialize};

use crate::map::{CityId, CommodityId, GameMap};
use crate::state::PlayerId;
use crate::value::{self, Reward};

/// What a generation algorithm produces: a commodity and where it must go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractSpec {
    pub commodity: CommodityId,
    pub destination: CityId,
}

impl ContractSpec {
    /// Money and tie rewards for delivering this contract on `map`.
    pub fn reward(&self, map: &GameMap) -> Option<Reward> {
        value::reward(map, self)
    }
}

/// Whether a contract is open to everyone or held by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Market,
    Private,
}

/// A delivery contract as stored in game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub commodity: CommodityId,
    pub destination: CityId,
    pub kind: ContractKind,
    pub fulfilled: bool,
    pub player: Option<PlayerId>,
    /// Creation time in milliseconds, supplied by the caller.
    pub created_at: u64,
    /// Turns the owning player has held the contract; None while unassigned.
    pub turns_held: Option<u32>,
}

impl Contract {
    /// A private contract owned by `player`, held for zero turns.
    pub fn private(spec: ContractSpec, player: PlayerId, created_at: u64) -> Contract {
        Contract {
            commodity: spec.commodity,
            destination: spec.destination,
            kind: ContractKind::Private,
            fulfilled: false,
            player: Some(player),
            created_at,
            turns_held: Some(0),
        }
    }

    /// An unowned market contract.
    pub fn market(spec: ContractSpec, created_at: u64) -> Contract {
        Contract {
            commodity: spec.commodity,
            destination: spec.destination,
            kind: ContractKind::Market,
            fulfilled: false,
            player: None,
            created_at,
            turns_held: None,
        }
    }

    pub fn spec(&self) -> ContractSpec {
        ContractSpec {
            commodity: self.commodity,
            destination: self.destination,
        }
    }
}
