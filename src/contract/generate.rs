//! Contract generation.
//!
//! Every algorithm follows the same pipeline:
//!
//! 1. collect destination candidates within a hop radius,
//! 2. bucket them by compass direction from the reference cities,
//! 3. draw a direction by weight,
//! 4. draw a commodity from an exclusion-filtered pool,
//! 5. draw a destination by city value among candidates that do not already
//!    supply the commodity.
//!
//! Any stage that comes up empty ends generation with a `GenerationFailure`
//! naming the stage. All failures are retryable.

use std::collections::BTreeSet;

use rand::Rng;

use super::buckets::DirectionBuckets;
use super::draw::{pick_uniform, pick_weighted};
use super::model::ContractSpec;
use crate::config::{DirectionWeights, GenerationConfig};
use crate::error::{GenerationFailure, Generated};
use crate::geo::Direction;
use crate::map::{
    any_route, cities_connected_to, no_mountains, shortest_distance, CityId, CitySet, CommodityId,
    GameMap, Region,
};
use crate::state::{GameState, Player};
use crate::value::value_of_city;

/// Private offers generated in one batch, with the shortfall made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferBatch {
    pub offers: Vec<ContractSpec>,
    pub requested: usize,
    /// Generation attempts spent, including failed and duplicate ones.
    pub attempts: usize,
}

impl OfferBatch {
    pub fn is_complete(&self) -> bool {
        self.offers.len() >= self.requested
    }

    /// How many offers are missing from the requested count.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.offers.len())
    }
}

/// Fails with `UnknownCity` for the first id that is not on the map.
fn check_cities(map: &GameMap, cities: &[CityId]) -> Generated<()> {
    match cities.iter().find(|c| map.city(**c).is_none()) {
        Some(&bad) => {
            log::warn!("contract generation: unknown city {:?}", bad);
            Err(GenerationFailure::UnknownCity(bad))
        }
        None => Ok(()),
    }
}

/// Commodities supplied by any of `cities`, in id order.
fn commodities_in(map: &GameMap, cities: impl IntoIterator<Item = CityId>) -> BTreeSet<CommodityId> {
    cities
        .into_iter()
        .filter_map(|c| map.city(c))
        .flat_map(|c| c.commodities.iter().copied())
        .collect()
}

/// Drops commodities that every city in `bucket` already supplies.
fn worth_contracting(map: &GameMap, pool: BTreeSet<CommodityId>, bucket: &[CityId]) -> Vec<CommodityId> {
    pool.into_iter()
        .filter(|&c| !bucket.iter().all(|&city| map.supplies(city, c)))
        .collect()
}

/// Value-weighted destination draw among `bucket` cities that lack `commodity`.
fn pick_destination(
    map: &GameMap,
    state: &GameState,
    bucket: &[CityId],
    commodity: CommodityId,
    is_hub: impl Fn(CityId) -> bool,
    rng: &mut impl Rng,
) -> Generated<CityId> {
    let weighted: Vec<(CityId, f64)> = bucket
        .iter()
        .filter(|&&c| !map.supplies(c, commodity))
        .map(|&c| (c, value_of_city(map, state, c, is_hub(c)) as f64))
        .collect();
    pick_weighted(&weighted, rng).ok_or_else(|| {
        log::debug!(
            "no destination lacks {} among {} candidates",
            map.commodity_key(commodity),
            bucket.len()
        );
        GenerationFailure::NoDestination
    })
}

/// Buckets candidates, fills empty buckets from their opposites, and draws a direction.
fn choose_bucket(
    mut buckets: DirectionBuckets,
    weights: &DirectionWeights,
    rng: &mut impl Rng,
) -> Generated<(Direction, Vec<CityId>)> {
    buckets.fill_from_opposites();
    let direction = buckets.choose(weights, rng).ok_or_else(|| {
        log::debug!("every direction bucket is empty");
        GenerationFailure::NoDirection
    })?;
    Ok((direction, buckets.get(direction).to_vec()))
}

/// Generates the first contract for a player starting between two cities.
///
/// Candidates lie within `candidate_hops` of either starting city without
/// crossing mountains, bucketed by direction from both. When one compass axis
/// has no candidates the draw is an even split along the other axis. The
/// commodity comes from the starting cities, minus anything every candidate
/// in the chosen direction already supplies.
pub fn generate_starting_contract(
    map: &GameMap,
    state: &GameState,
    starting_cities: &[CityId],
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Generated<ContractSpec> {
    if starting_cities.len() != 2 {
        log::warn!("starting contract: expected 2 cities, got {}", starting_cities.len());
        return Err(GenerationFailure::WrongStartingCityCount(starting_cities.len()));
    }
    check_cities(map, starting_cities)?;

    let candidates = cities_connected_to(map, starting_cities, config.candidate_hops, no_mountains, false);
    if candidates.is_empty() {
        log::debug!("starting contract: no candidates near {:?}", starting_cities);
        return Err(GenerationFailure::NoCandidates);
    }

    let buckets = DirectionBuckets::from_references(map, starting_cities, &candidates);
    let weights = if buckets.axis_is_empty(Direction::North) {
        DirectionWeights::EAST_WEST
    } else if buckets.axis_is_empty(Direction::East) {
        DirectionWeights::NORTH_SOUTH
    } else {
        config.balanced_weights
    };
    let (_, bucket) = choose_bucket(buckets, &weights, rng)?;

    let pool = worth_contracting(map, commodities_in(map, starting_cities.iter().copied()), &bucket);
    let commodity = pick_uniform(&pool, rng).ok_or_else(|| {
        log::debug!("starting contract: no commodity worth contracting");
        GenerationFailure::NoCommodities
    })?;

    let destination = pick_destination(map, state, &bucket, commodity, |c| state.is_hub_city(c), rng)?;
    Ok(ContractSpec {
        commodity,
        destination,
    })
}

/// Direction weights biased away from whichever coast `city` is near.
fn coastal_weights(map: &GameMap, city: CityId, config: &GenerationConfig) -> DirectionWeights {
    match map.city(city) {
        Some(c) if c.near_east_coast => config.near_east_coast_weights,
        Some(c) if c.near_west_coast => config.near_west_coast_weights,
        _ => config.balanced_weights,
    }
}

/// Generates one private contract for a player during play.
///
/// Direction is measured from the player's current city. Candidates lie
/// within `candidate_hops` of any active city. The commodity pool is every
/// commodity within `commodity_hops` of the active cities, or, when
/// `region_override` is given, every commodity produced in that region.
pub fn generate_private_contract_spec(
    map: &GameMap,
    state: &GameState,
    player: &Player,
    region_override: Option<Region>,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Generated<ContractSpec> {
    let active = &player.active_cities;
    let Some(reference) = player.current_city() else {
        log::debug!("private contract: player {} has no active cities", player.id);
        return Err(GenerationFailure::NoActiveCities);
    };
    check_cities(map, active)?;

    let weights = coastal_weights(map, reference, config);
    let candidates = cities_connected_to(map, active, config.candidate_hops, any_route, false);
    if candidates.is_empty() {
        log::debug!("private contract: no candidates for player {}", player.id);
        return Err(GenerationFailure::NoCandidates);
    }

    let buckets = DirectionBuckets::from_references(map, &[reference], &candidates);
    let (_, bucket) = choose_bucket(buckets, &weights, rng)?;

    let pool = match region_override {
        Some(region) => map
            .commodity_ids()
            .filter(|&c| map.commodity(c).is_some_and(|info| info.regions.contains(region)))
            .collect(),
        None => commodities_in(
            map,
            cities_connected_to(map, active, config.commodity_hops, any_route, true),
        ),
    };
    let pool = worth_contracting(map, pool, &bucket);
    let commodity = pick_uniform(&pool, rng).ok_or_else(|| {
        log::debug!("private contract: empty commodity pool for player {}", player.id);
        GenerationFailure::NoCommodities
    })?;

    let destination = pick_destination(map, state, &bucket, commodity, |c| player.hub_city == Some(c), rng)?;
    Ok(ContractSpec {
        commodity,
        destination,
    })
}

/// Number of private offers a player receives per batch.
pub fn offer_count(player: &Player, config: &GenerationConfig) -> usize {
    config.base_offers + player.hub_city.is_some() as usize + player.regional_office.is_some() as usize
}

/// Generates a batch of distinct private offers for a player.
///
/// A regional office reserves the first attempt for a region-filtered offer.
/// The remaining slots draw from the default pool until the batch is full or
/// `offer_attempts` is spent; duplicates of an already collected
/// (commodity, destination) pair are discarded. A short batch is not an error.
pub fn generate_private_contract_offers(
    map: &GameMap,
    state: &GameState,
    player: &Player,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> OfferBatch {
    let requested = offer_count(player, config);
    let mut offers: Vec<ContractSpec> = Vec::with_capacity(requested);
    let mut attempts = 0;

    if let Some(region) = player.regional_office {
        if attempts < config.offer_attempts && requested > 0 {
            attempts += 1;
            match generate_private_contract_spec(map, state, player, Some(region), config, rng) {
                Ok(spec) => offers.push(spec),
                Err(e) => log::debug!("regional offer for {} failed: {}", player.id, e),
            }
        }
    }

    while offers.len() < requested && attempts < config.offer_attempts {
        attempts += 1;
        match generate_private_contract_spec(map, state, player, None, config, rng) {
            Ok(spec) if !offers.contains(&spec) => offers.push(spec),
            Ok(_) => {}
            Err(e) => log::debug!("offer attempt {} for {} failed: {}", attempts, player.id, e),
        }
    }

    if offers.len() < requested {
        log::debug!(
            "offer batch for {}: {} of {} after {} attempts",
            player.id,
            offers.len(),
            requested,
            attempts
        );
    }

    OfferBatch {
        offers,
        requested,
        attempts,
    }
}

/// Generates an open market contract near any player's network.
///
/// The destination is a value-weighted draw from cities within
/// `candidate_hops` of all active cities (excluding the active cities). The
/// commodity must be available within `commodity_hops` of the active cities,
/// not supplied by the destination, and at least `min_market_hops` from its
/// nearest producer.
pub fn generate_market_contract(
    map: &GameMap,
    state: &GameState,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Generated<ContractSpec> {
    let active = state.all_active_cities();
    if active.is_empty() {
        log::debug!("market contract: no active cities");
        return Err(GenerationFailure::NoActiveCities);
    }
    check_cities(map, &active)?;

    let candidates: CitySet = cities_connected_to(map, &active, config.candidate_hops, any_route, false);
    let weighted: Vec<(CityId, f64)> = candidates
        .iter()
        .map(|&c| (c, value_of_city(map, state, c, state.is_hub_city(c)) as f64))
        .collect();
    let destination = pick_weighted(&weighted, rng).ok_or_else(|| {
        log::debug!("market contract: no candidates");
        GenerationFailure::NoCandidates
    })?;

    let nearby = cities_connected_to(map, &active, config.commodity_hops, any_route, true);
    let pool: Vec<CommodityId> = commodities_in(map, nearby)
        .into_iter()
        .filter(|&c| !map.supplies(destination, c))
        .filter(|&c| {
            shortest_distance(map, destination, |city| map.supplies(city, c), any_route)
                .is_some_and(|d| d >= config.min_market_hops)
        })
        .collect();

    let commodity = pick_uniform(&pool, rng).ok_or_else(|| {
        let key = map.city_key(destination).to_string();
        log::error!("market contract: no commodity far enough from {}", key);
        GenerationFailure::NoMarketCommodity(key)
    })?;

    Ok(ContractSpec {
        commodity,
        destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{CityDefinition, GameMapBuilder};
    use crate::value::money_value;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Two starting cities in the middle of a plus-shaped map.
    ///
    /// ```text
    ///                north2
    ///                  |
    ///                north
    ///                  |
    ///  west2 - west - home - away - east - east2
    ///                  |
    ///                south (mountain pass to south2)
    /// ```
    fn plus() -> GameMap {
        GameMapBuilder::new()
            .city(CityDefinition::new("home", Region::NorthCentral, 40.0, -95.0).supplying(&["corn", "cattle"]))
            .city(CityDefinition::new("away", Region::NorthCentral, 40.0, -94.0).supplying(&["cattle"]))
            .city(CityDefinition::new("north", Region::NorthCentral, 43.0, -94.5).supplying(&["wheat"]))
            .city(CityDefinition::new("north2", Region::NorthCentral, 46.0, -94.5))
            .city(CityDefinition::new("south", Region::SouthCentral, 37.0, -94.5))
            .city(CityDefinition::new("south2", Region::SouthCentral, 34.0, -94.5).supplying(&["oil"]))
            .city(CityDefinition::new("west", Region::NorthWest, 40.0, -100.0))
            .city(CityDefinition::new("west2", Region::NorthWest, 40.0, -105.0).supplying(&["corn"]).large())
            .city(CityDefinition::new("east", Region::NorthEast, 40.0, -89.0).supplying(&["cattle"]))
            .city(CityDefinition::new("east2", Region::NorthEast, 40.0, -84.0).large())
            .route("home", "away", false)
            .route("home", "north", false)
            .route("north", "north2", false)
            .route("home", "south", false)
            .route("south", "south2", true)
            .route("home", "west", false)
            .route("west", "west2", false)
            .route("away", "east", false)
            .route("east", "east2", false)
            .build()
            .unwrap()
    }

    fn id(map: &GameMap, key: &str) -> CityId {
        map.city_id(key).unwrap()
    }

    #[test]
    fn starting_contract_invariants_hold_over_many_seeds() {
        let map = plus();
        let state = GameState::default();
        let config = GenerationConfig::default();
        let start = [id(&map, "home"), id(&map, "away")];
        let reachable = cities_connected_to(&map, &start, 2, no_mountains, false);
        let mut produced = 0;
        for seed in 0..300 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let Ok(spec) = generate_starting_contract(&map, &state, &start, &config, &mut rng) else {
                continue;
            };
            produced += 1;
            assert!(!map.supplies(spec.destination, spec.commodity));
            assert!(reachable.contains(&spec.destination));
            assert_ne!(spec.destination, id(&map, "south2"), "mountain pass crossed");
            let starting_supplies: BTreeSet<CommodityId> = commodities_in(&map, start);
            assert!(starting_supplies.contains(&spec.commodity));
        }
        assert!(produced > 250, "only {produced} contracts");
    }

    #[test]
    fn starting_contract_rejects_wrong_city_count() {
        let map = plus();
        let mut rng = SmallRng::seed_from_u64(0);
        let config = GenerationConfig::default();
        let one = [id(&map, "home")];
        assert_eq!(
            generate_starting_contract(&map, &GameState::default(), &one, &config, &mut rng),
            Err(GenerationFailure::WrongStartingCityCount(1))
        );
        let bad = [id(&map, "home"), CityId(400)];
        assert_eq!(
            generate_starting_contract(&map, &GameState::default(), &bad, &config, &mut rng),
            Err(GenerationFailure::UnknownCity(CityId(400)))
        );
    }

    #[test]
    fn starting_contract_on_east_west_line() {
        // Only east/west candidates exist, so the north/south axis is never drawn.
        let map = GameMapBuilder::new()
            .city(CityDefinition::new("a", Region::NorthCentral, 40.0, -95.0).supplying(&["corn"]))
            .city(CityDefinition::new("b", Region::NorthCentral, 40.0, -94.0))
            .city(CityDefinition::new("w", Region::NorthWest, 40.0, -100.0))
            .city(CityDefinition::new("e", Region::NorthEast, 40.0, -90.0))
            .route("w", "a", false)
            .route("a", "b", false)
            .route("b", "e", false)
            .build()
            .unwrap();
        let start = [id(&map, "a"), id(&map, "b")];
        let config = GenerationConfig::default();
        let mut seen = BTreeSet::new();
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let spec = generate_starting_contract(&map, &GameState::default(), &start, &config, &mut rng).unwrap();
            assert_eq!(spec.commodity, map.commodity_id("corn").unwrap());
            seen.insert(spec.destination);
        }
        let expected: BTreeSet<CityId> = [id(&map, "w"), id(&map, "e")].into_iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn starting_contract_without_worthwhile_commodity() {
        // Every neighbour already supplies the only starting commodity.
        let map = GameMapBuilder::new()
            .city(CityDefinition::new("a", Region::NorthCentral, 40.0, -95.0).supplying(&["corn"]))
            .city(CityDefinition::new("b", Region::NorthCentral, 40.0, -94.0).supplying(&["corn"]))
            .city(CityDefinition::new("c", Region::NorthCentral, 40.0, -93.0).supplying(&["corn"]))
            .route("a", "b", false)
            .route("b", "c", false)
            .build()
            .unwrap();
        let start = [id(&map, "a"), id(&map, "b")];
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(
            generate_starting_contract(&map, &GameState::default(), &start, &GenerationConfig::default(), &mut rng),
            Err(GenerationFailure::NoCommodities)
        );
    }

    #[test]
    fn starting_contract_isolated_cities() {
        let map = GameMapBuilder::new()
            .city(CityDefinition::new("a", Region::NorthCentral, 40.0, -95.0).supplying(&["corn"]))
            .city(CityDefinition::new("b", Region::NorthCentral, 40.0, -94.0))
            .city(CityDefinition::new("c", Region::NorthCentral, 40.0, -93.0))
            .route("a", "b", false)
            .route("b", "c", true)
            .build()
            .unwrap();
        let start = [id(&map, "a"), id(&map, "b")];
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(
            generate_starting_contract(&map, &GameState::default(), &start, &GenerationConfig::default(), &mut rng),
            Err(GenerationFailure::NoCandidates)
        );
    }

    #[test]
    fn coastal_bias_selection() {
        let map = GameMapBuilder::new()
            .city(CityDefinition::new("port", Region::NorthEast, 40.0, -74.0).near_east_coast())
            .city(CityDefinition::new("bay", Region::NorthWest, 45.0, -122.0).near_west_coast())
            .city(CityDefinition::new("plain", Region::NorthCentral, 41.0, -95.0))
            .build()
            .unwrap();
        let config = GenerationConfig::default();
        assert_eq!(coastal_weights(&map, id(&map, "port"), &config), config.near_east_coast_weights);
        assert_eq!(coastal_weights(&map, id(&map, "bay"), &config), config.near_west_coast_weights);
        assert_eq!(coastal_weights(&map, id(&map, "plain"), &config), config.balanced_weights);
    }

    /// Counts private contract destinations by direction from a centre city
    /// with one plain neighbour on each side.
    fn direction_counts(centre: CityDefinition) -> [usize; 4] {
        let map = GameMapBuilder::new()
            .city(centre.supplying(&["corn"]))
            .city(CityDefinition::new("n", Region::NorthCentral, 44.0, -90.0))
            .city(CityDefinition::new("e", Region::NorthEast, 40.0, -85.0))
            .city(CityDefinition::new("s", Region::SouthCentral, 36.0, -90.0))
            .city(CityDefinition::new("w", Region::NorthCentral, 40.0, -95.0))
            .route("c", "n", false)
            .route("c", "e", false)
            .route("c", "s", false)
            .route("c", "w", false)
            .build()
            .unwrap();
        let player = Player::new("ana", vec![id(&map, "c")]);
        let state = GameState::new(vec![player.clone()], Vec::new());
        let config = GenerationConfig::default();
        let mut counts = [0; 4];
        for seed in 0..4000 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let spec = generate_private_contract_spec(&map, &state, &player, None, &config, &mut rng).unwrap();
            let direction = match map.city_key(spec.destination) {
                "n" => Direction::North,
                "e" => Direction::East,
                "s" => Direction::South,
                _ => Direction::West,
            };
            counts[direction as usize] += 1;
        }
        counts
    }

    #[test]
    fn balanced_draws_favour_east_and_west() {
        let [n, e, s, w] = direction_counts(CityDefinition::new("c", Region::NorthCentral, 40.0, -90.0));
        // 3/7/3/7 out of 20: expect 600 / 1400 / 600 / 1400.
        for count in [n, s] {
            assert!((450..=750).contains(&count), "{n} {e} {s} {w}");
        }
        for count in [e, w] {
            assert!((1200..=1600).contains(&count), "{n} {e} {s} {w}");
        }
    }

    #[test]
    fn near_east_coast_draws_favour_west() {
        let centre = CityDefinition::new("c", Region::NorthCentral, 40.0, -90.0).near_east_coast();
        let [n, e, s, w] = direction_counts(centre);
        // 3/3/3/11 out of 20: expect 600 / 600 / 600 / 2200.
        for count in [n, e, s] {
            assert!((450..=750).contains(&count), "{n} {e} {s} {w}");
        }
        assert!((2000..=2400).contains(&w), "{n} {e} {s} {w}");
    }

    #[test]
    fn private_contract_needs_active_cities() {
        let map = plus();
        let mut rng = SmallRng::seed_from_u64(1);
        let player = Player::new("ana", Vec::new());
        assert_eq!(
            generate_private_contract_spec(&map, &GameState::default(), &player, None, &GenerationConfig::default(), &mut rng),
            Err(GenerationFailure::NoActiveCities)
        );
    }

    #[test]
    fn private_contract_invariants() {
        let map = plus();
        let player = Player::new("ana", vec![id(&map, "home"), id(&map, "away")]);
        let state = GameState::new(vec![player.clone()], Vec::new());
        let config = GenerationConfig::default();
        let candidates = cities_connected_to(&map, &player.active_cities, 2, any_route, false);
        let pool = commodities_in(&map, cities_connected_to(&map, &player.active_cities, 1, any_route, true));
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            if let Ok(spec) = generate_private_contract_spec(&map, &state, &player, None, &config, &mut rng) {
                assert!(!map.supplies(spec.destination, spec.commodity));
                assert!(candidates.contains(&spec.destination));
                assert!(!player.active_cities.contains(&spec.destination));
                assert!(pool.contains(&spec.commodity));
            }
        }
    }

    #[test]
    fn private_contract_region_override() {
        let map = plus();
        let player = Player::new("ana", vec![id(&map, "home")]);
        let state = GameState::new(vec![player.clone()], Vec::new());
        let config = GenerationConfig::default();
        let oil = map.commodity_id("oil").unwrap();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let spec = generate_private_contract_spec(
                &map,
                &state,
                &player,
                Some(Region::SouthCentral),
                &config,
                &mut rng,
            )
            .unwrap();
            assert_eq!(spec.commodity, oil);
        }
    }

    #[test]
    fn offer_count_grows_with_upgrades() {
        let config = GenerationConfig::default();
        let mut p = Player::new("ana", vec![CityId(0)]);
        assert_eq!(offer_count(&p, &config), 2);
        p.hub_city = Some(CityId(0));
        assert_eq!(offer_count(&p, &config), 3);
        p.regional_office = Some(Region::NorthEast);
        assert_eq!(offer_count(&p, &config), 4);
    }

    #[test]
    fn offers_are_unique() {
        let map = plus();
        let mut player = Player::new("ana", vec![id(&map, "home"), id(&map, "away")]);
        player.hub_city = Some(id(&map, "home"));
        player.regional_office = Some(Region::SouthCentral);
        let state = GameState::new(vec![player.clone()], Vec::new());
        let config = GenerationConfig::default();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let batch = generate_private_contract_offers(&map, &state, &player, &config, &mut rng);
            assert_eq!(batch.requested, 4);
            assert!(batch.attempts <= config.offer_attempts);
            let unique: BTreeSet<ContractSpec> = batch.offers.iter().copied().collect();
            assert_eq!(unique.len(), batch.offers.len());
            assert!(batch.offers.len() <= batch.requested);
            assert_eq!(batch.shortfall(), batch.requested - batch.offers.len());
            // The regional slot always succeeds on this map and comes first.
            assert_eq!(batch.offers[0].commodity, map.commodity_id("oil").unwrap());
        }
    }

    #[test]
    fn offers_fall_short_when_pool_is_tiny() {
        // One candidate and one commodity: only one distinct offer exists.
        let map = GameMapBuilder::new()
            .city(CityDefinition::new("a", Region::NorthCentral, 40.0, -95.0).supplying(&["corn"]))
            .city(CityDefinition::new("b", Region::NorthCentral, 40.0, -90.0))
            .route("a", "b", false)
            .build()
            .unwrap();
        let player = Player::new("ana", vec![id(&map, "a")]);
        let state = GameState::new(vec![player.clone()], Vec::new());
        let config = GenerationConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let batch = generate_private_contract_offers(&map, &state, &player, &config, &mut rng);
        assert_eq!(batch.offers.len(), 1);
        assert!(!batch.is_complete());
        assert_eq!(batch.shortfall(), 1);
        assert_eq!(batch.attempts, config.offer_attempts);
    }

    #[test]
    fn market_contract_invariants() {
        let map = plus();
        let state = GameState::new(
            vec![Player::new("ana", vec![id(&map, "north")]), Player::new("bo", vec![id(&map, "south")])],
            Vec::new(),
        );
        let config = GenerationConfig::default();
        let active = state.all_active_cities();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let spec = generate_market_contract(&map, &state, &config, &mut rng)
                .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
            assert!(!active.contains(&spec.destination));
            assert!(!map.supplies(spec.destination, spec.commodity));
            assert!(money_value(&map, &spec) >= 6000);
        }
    }

    #[test]
    fn market_contract_without_players() {
        let map = plus();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(
            generate_market_contract(&map, &GameState::default(), &GenerationConfig::default(), &mut rng),
            Err(GenerationFailure::NoActiveCities)
        );
    }

    #[test]
    fn market_contract_reports_unexpected_failure() {
        // The only reachable commodity is one hop from every candidate.
        let map = GameMapBuilder::new()
            .city(CityDefinition::new("a", Region::NorthCentral, 40.0, -95.0).supplying(&["corn"]))
            .city(CityDefinition::new("b", Region::NorthCentral, 40.0, -90.0))
            .route("a", "b", false)
            .build()
            .unwrap();
        let state = GameState::new(vec![Player::new("ana", vec![id(&map, "a")])], Vec::new());
        let mut rng = SmallRng::seed_from_u64(0);
        let err = generate_market_contract(&map, &state, &GenerationConfig::default(), &mut rng).unwrap_err();
        assert!(err.is_unexpected());
        assert_eq!(err, GenerationFailure::NoMarketCommodity("b".into()));
    }

    #[test]
    fn generation_is_reproducible() {
        let map = plus();
        let player = Player::new("ana", vec![id(&map, "home"), id(&map, "away")]);
        let state = GameState::new(vec![player.clone()], Vec::new());
        let config = GenerationConfig::default();
        let run = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (
                generate_private_contract_offers(&map, &state, &player, &config, &mut rng),
                generate_market_contract(&map, &state, &config, &mut rng),
            )
        };
        for seed in 0..20 {
            assert_eq!(run(seed), run(seed));
        }
    }
}
