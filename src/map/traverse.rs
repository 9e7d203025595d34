//! Breadth-first traversal over the route graph.
//!
//! Both searches expand one hop level at a time and visit each city at most
//! once. Edge predicates decide which routes may be crossed, so the same
//! traversal serves "any route" and "no mountain crossings" queries.

use std::collections::BTreeSet;

use super::city::CityId;
use super::dataset::GameMap;
use super::route::Route;

/// An ordered set of cities. Ordering keeps downstream random draws reproducible.
pub type CitySet = BTreeSet<CityId>;

/// Level ceiling for `shortest_distance`.
pub const MAX_SEARCH_DEPTH: u32 = 30;

/// Edge predicate accepting every route.
pub fn any_route(_: &Route) -> bool {
    true
}

/// Edge predicate rejecting mountainous routes.
pub fn no_mountains(route: &Route) -> bool {
    !route.mountainous
}

/// Expands one BFS level from `frontier`, marking and returning newly reached cities.
fn expand_level<E>(map: &GameMap, frontier: &[CityId], visited: &mut [bool], edge_ok: &E) -> Vec<CityId>
where
    E: Fn(&Route) -> bool,
{
    let mut next = Vec::new();
    for &city in frontier {
        for (route, other) in map.neighbors(city) {
            if !edge_ok(route) || visited[other.index()] {
                continue;
            }
            visited[other.index()] = true;
            next.push(other);
        }
    }
    next
}

/// Returns every city reachable from `from` within `distance` hops, crossing
/// only routes accepted by `edge_ok`.
///
/// Sources are part of the result only when `include_from` is set. Unknown
/// source ids are skipped with a warning. The search stops early once no new
/// city is found or the whole map has been visited.
pub fn cities_connected_to<E>(
    map: &GameMap,
    from: &[CityId],
    distance: u32,
    edge_ok: E,
    include_from: bool,
) -> CitySet
where
    E: Fn(&Route) -> bool,
{
    let total = map.city_count();
    let mut visited = vec![false; total];
    let mut frontier: Vec<CityId> = Vec::with_capacity(from.len());
    for &city in from {
        if map.city(city).is_none() {
            log::warn!("cities_connected_to: unknown city {:?}", city);
            continue;
        }
        if !visited[city.index()] {
            visited[city.index()] = true;
            frontier.push(city);
        }
    }
    let sources = frontier.clone();
    let mut seen = frontier.len();

    let mut depth = 0;
    while depth < distance && !frontier.is_empty() && seen < total {
        frontier = expand_level(map, &frontier, &mut visited, &edge_ok);
        seen += frontier.len();
        depth += 1;
    }

    let mut reached: CitySet = visited
        .iter()
        .enumerate()
        .filter(|(_, v)| **v)
        .map(|(i, _)| CityId(i as u16))
        .collect();
    if !include_from {
        for s in &sources {
            reached.remove(s);
        }
    }
    reached
}

/// Returns the hop count from `from` to the nearest city accepted by `matches`.
///
/// Returns `Some(0)` when `from` itself matches, and `None` when nothing
/// matches within `MAX_SEARCH_DEPTH` levels, the reachable graph is exhausted,
/// or `from` is not a city on this map.
pub fn shortest_distance<M, E>(map: &GameMap, from: CityId, matches: M, edge_ok: E) -> Option<u32>
where
    M: Fn(CityId) -> bool,
    E: Fn(&Route) -> bool,
{
    if map.city(from).is_none() {
        log::warn!("shortest_distance: unknown city {:?}", from);
        return None;
    }
    if matches(from) {
        return Some(0);
    }

    let mut visited = vec![false; map.city_count()];
    visited[from.index()] = true;
    let mut frontier = vec![from];
    for depth in 1..=MAX_SEARCH_DEPTH {
        frontier = expand_level(map, &frontier, &mut visited, &edge_ok);
        if frontier.is_empty() {
            return None;
        }
        if frontier.iter().any(|&c| matches(c)) {
            return Some(depth);
        }
    }
    None
}
