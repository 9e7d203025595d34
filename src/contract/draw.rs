//! Random selection helpers.
//!
//! `weighted_index` is the pure core: given weights and a unit draw in
//! [0, 1) it walks the cumulative sum and returns the first item whose
//! running total exceeds the scaled draw. Non-positive and non-finite weights
//! are never selected.

use rand::Rng;

/// Returns the index selected by unit draw `u`, or None if no weight is positive.
pub fn weighted_index(weights: &[f64], u: f64) -> Option<usize> {
    let usable = |w: f64| w.is_finite() && w > 0.0;
    let total: f64 = weights.iter().copied().filter(|w| usable(*w)).sum();
    if total <= 0.0 {
        return None;
    }

    let target = u.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &w) in weights.iter().enumerate() {
        if !usable(w) {
            continue;
        }
        cumulative += w;
        last = Some(i);
        if target < cumulative {
            return Some(i);
        }
    }
    // Only reachable through rounding when u is at or near 1.
    last
}

/// Draws one item with probability proportional to its weight.
pub fn pick_weighted<T: Copy>(items: &[(T, f64)], rng: &mut impl Rng) -> Option<T> {
    let weights: Vec<f64> = items.iter().map(|(_, w)| *w).collect();
    let u: f64 = rng.gen();
    weighted_index(&weights, u).map(|i| items[i].0)
}

/// Draws one item uniformly.
pub fn pick_uniform<T: Copy>(items: &[T], rng: &mut impl Rng) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.gen_range(0..items.len())])
}
