use crate::datastructures::Action;
use itertools::Itertools;
use std::mem;


/// Every subset of `actions`, the empty subset included.
///
/// Built iteratively: each action in input order doubles the collection by
/// appending a copy of every existing subset extended with that action. The
/// resulting order is the one a binary counter over action indices produces
/// (the subset at position `m` holds exactly the actions whose index bit is
/// set in `m`), which makes the first-seen tie-break of the exhaustive
/// search deterministic.
///
/// Materializing all `2^n` subsets is the point: the profiler observes the
/// exponential memory growth of exactly this collection.
pub fn power_set(actions: &[Action]) -> Vec<Vec<Action>> {
    let mut all_combinations: Vec<Vec<Action>> = vec![Vec::new()];
    for action in actions {
        let new_combinations = all_combinations
            .iter()
            .map(|combination| {
                let mut extended = combination.clone();
                extended.push(action.clone());
                extended
            })
            .collect_vec();
        all_combinations.extend(new_combinations);
    }
    all_combinations
}

/// The power set together with its approximate footprint in megabytes.
pub fn power_set_with_memory(actions: &[Action]) -> (Vec<Vec<Action>>, f64) {
    let combinations = power_set(actions);
    let memory_mb = combinations_memory_mb(&combinations);
    (combinations, memory_mb)
}

/// Approximate footprint of a materialized combination set in megabytes.
///
/// Counts the outer vector plus every per-subset buffer. This is a
/// deterministic `size_of` estimate, not an allocator measurement.
pub fn combinations_memory_mb(combinations: &[Vec<Action>]) -> f64 {
    let bytes = mem::size_of_val(combinations)
        + combinations
            .iter()
            .map(|c| c.len() * mem::size_of::<Action>())
            .sum::<usize>();
    bytes as f64 / (1024.0 * 1024.0)
}

/// Approximate footprint of an accumulated selection in megabytes.
pub fn selection_memory_mb(actions: &[Action]) -> f64 {
    let bytes = mem::size_of_val(actions)
        + actions.iter().map(|a| a.name.len()).sum::<usize>();
    bytes as f64 / (1024.0 * 1024.0)
}

/// Iterate all subset bitmasks of `n` actions without materializing anything.
///
/// Mask-increment order is identical to the order of [`power_set`], so both
/// enumeration modes resolve benefit ties to the same subset.
pub fn subset_masks(n: usize) -> impl Iterator<Item = u128> {
    0..(1u128 << n)
}

/// Cost and benefit sums of the subset encoded by `mask`.
pub fn subset_aggregates(actions: &[Action], mask: u128) -> (f64, f64) {
    let mut cost = 0.0;
    let mut benefit = 0.0;
    for (i, action) in actions.iter().enumerate() {
        if mask & (1 << i) != 0 {
            cost += action.cost;
            benefit += action.benefit;
        }
    }
    (cost, benefit)
}

/// Materialize the subset encoded by `mask`.
pub fn subset_for_mask(actions: &[Action], mask: u128) -> Vec<Action> {
    actions
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, action)| action.clone())
        .collect()
}
