//! City valuation and contract rewards.
//!
//! `value_of_city` is a hidden selection weight used when drawing contract
//! destinations. `money_value` and `railroad_tie_value` are the two rewards
//! printed on a contract.

use crate::contract::model::ContractSpec;
use crate::map::{any_route, cities_connected_to, shortest_distance, CityId, GameMap, REGION_COUNT};
use crate::state::GameState;

/// Cash paid per hop between the destination and the nearest producer.
pub const MONEY_PER_HOP: u32 = 3000;

/// Railroad-tie reward indexed by `[destination region][source region]`,
/// in `Region` index order (NW, NC, NE, SW, SC, SE).
pub const TIE_MATRIX: [[u8; REGION_COUNT]; REGION_COUNT] = [
    [1, 2, 3, 2, 3, 4],
    [2, 1, 2, 3, 2, 3],
    [3, 2, 1, 4, 3, 2],
    [2, 3, 4, 1, 2, 3],
    [3, 2, 3, 2, 1, 2],
    [4, 3, 2, 3, 2, 1],
];

/// Both rewards for one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub money: u32,
    pub ties: u8,
}

/// Returns the selection weight of `city` given the current contracts.
///
/// Base score is `2 * (1 + has_commodities + large + 3 * west_coast)`, plus two
/// points per fulfilled contract delivered here and one per fulfilled contract
/// whose commodity this city produces. A hub city also adds the plain value of
/// each directly connected city. Unknown cities are worth 0.
pub fn value_of_city(map: &GameMap, state: &GameState, city: CityId, is_hub_city: bool) -> u32 {
    let Some(info) = map.city(city) else {
        log::warn!("value_of_city: unknown city {:?}", city);
        return 0;
    };

    let base = 1 + info.has_commodities() as u32 + info.large as u32 + 3 * info.west_coast as u32;
    let mut value = 2 * base;

    for contract in state.fulfilled_contracts() {
        if contract.destination == city {
            value += 2;
        }
        if info.supplies(contract.commodity) {
            value += 1;
        }
    }

    if is_hub_city {
        for neighbor in cities_connected_to(map, &[city], 1, any_route, false) {
            value += value_of_city(map, state, neighbor, false);
        }
    }

    value
}

/// Cash reward: `MONEY_PER_HOP` times the hop count from the destination to
/// the nearest city producing the commodity. 0 when no producer is reachable.
pub fn money_value(map: &GameMap, spec: &ContractSpec) -> u32 {
    shortest_distance(
        map,
        spec.destination,
        |c| map.supplies(c, spec.commodity),
        any_route,
    )
    .map_or(0, |hops| hops * MONEY_PER_HOP)
}

/// Tie reward: the smallest `TIE_MATRIX` entry between the destination's
/// region and any region producing the commodity.
///
/// Returns None for unknown ids or a commodity with no production regions.
pub fn railroad_tie_value(map: &GameMap, spec: &ContractSpec) -> Option<u8> {
    let Some(destination) = map.city(spec.destination) else {
        log::warn!("railroad_tie_value: unknown city {:?}", spec.destination);
        return None;
    };
    let Some(commodity) = map.commodity(spec.commodity) else {
        log::warn!("railroad_tie_value: unknown commodity {:?}", spec.commodity);
        return None;
    };
    let row = &TIE_MATRIX[destination.region as usize];
    commodity.regions.iter().map(|r| row[r as usize]).min()
}

/// Computes both rewards, or None if the tie value is undefined.
pub fn reward(map: &GameMap, spec: &ContractSpec) -> Option<Reward> {
    Some(Reward {
        money: money_value(map, spec),
        ties: railroad_tie_value(map, spec)?,
    })
}
