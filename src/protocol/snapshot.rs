//! JSON game-state snapshots.
//!
//! Callers hand the engine players and contracts with string keys:
//!
//! ```json
//! {
//!   "players": [{"id": "ana", "activeCities": ["chicago"], "hubCity": null, "regionalOffice": "NE"}],
//!   "contracts": [{"commodity": "coal", "destination": "boston", "type": "market",
//!                  "fulfilled": false, "player": null, "createdAt": 0, "turnsHeld": null}]
//! }
//! ```
//!
//! Keys are resolved against a `GameMap` into typed ids. Encoding goes the
//! other way for generated contracts.

use serde::{Deserialize, Serialize};

use crate::contract::model::{Contract, ContractKind};
use crate::map::{GameMap, Region};
use crate::state::{GameState, Player, PlayerId};

/// Errors that can occur while decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown city key: '{0}'")]
    UnknownCity(String),

    #[error("unknown commodity key: '{0}'")]
    UnknownCommodity(String),

    #[error("unknown region code: '{0}'")]
    UnknownRegion(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotJson {
    pub players: Vec<PlayerJson>,
    pub contracts: Vec<ContractJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerJson {
    pub id: String,
    #[serde(default)]
    pub active_cities: Vec<String>,
    #[serde(default)]
    pub hub_city: Option<String>,
    #[serde(default)]
    pub regional_office: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractJson {
    pub commodity: String,
    pub destination: String,
    #[serde(rename = "type")]
    pub kind: ContractKind,
    #[serde(default)]
    pub fulfilled: bool,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub turns_held: Option<u32>,
}

/// Parses a JSON snapshot and resolves its keys against `map`.
pub fn parse_snapshot(map: &GameMap, json: &str) -> Result<GameState, SnapshotError> {
    let raw: SnapshotJson = serde_json::from_str(json)?;
    decode_snapshot(map, &raw)
}

/// Resolves an already parsed snapshot against `map`.
pub fn decode_snapshot(map: &GameMap, raw: &SnapshotJson) -> Result<GameState, SnapshotError> {
    let city = |key: &str| map.city_id(key).ok_or_else(|| SnapshotError::UnknownCity(key.to_string()));

    let mut players = Vec::with_capacity(raw.players.len());
    for p in &raw.players {
        let active = p
            .active_cities
            .iter()
            .map(|k| city(k.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut player = Player::new(p.id.as_str(), active);
        player.hub_city = p.hub_city.as_deref().map(city).transpose()?;
        player.regional_office = match p.regional_office.as_deref() {
            Some(code) => Some(Region::from_code(code).ok_or_else(|| SnapshotError::UnknownRegion(code.to_string()))?),
            None => None,
        };
        players.push(player);
    }

    let mut contracts = Vec::with_capacity(raw.contracts.len());
    for c in &raw.contracts {
        let commodity = map
            .commodity_id(&c.commodity)
            .ok_or_else(|| SnapshotError::UnknownCommodity(c.commodity.clone()))?;
        contracts.push(Contract {
            commodity,
            destination: city(c.destination.as_str())?,
            kind: c.kind,
            fulfilled: c.fulfilled,
            player: c.player.as_deref().map(PlayerId::from),
            created_at: c.created_at,
            turns_held: c.turns_held,
        });
    }

    Ok(GameState::new(players, contracts))
}

/// Converts a contract back to its string-keyed form.
pub fn encode_contract(map: &GameMap, contract: &Contract) -> ContractJson {
    ContractJson {
        commodity: map.commodity_key(contract.commodity).to_string(),
        destination: map.city_key(contract.destination).to_string(),
        kind: contract.kind,
        fulfilled: contract.fulfilled,
        player: contract.player.as_ref().map(|p| p.0.clone()),
        created_at: contract.created_at,
        turns_held: contract.turns_held,
    }
}
