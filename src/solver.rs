use itertools::Itertools;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::combinations;
use crate::datastructures::*;


/// Exhaustive search over every subset of `actions`.
///
/// Materializes the full power set, scans it in enumeration order and keeps
/// the budget-feasible subset with the strictly greatest benefit. Ties on
/// benefit therefore resolve to the earliest-generated subset, not
/// necessarily the cheapest one. Time and space are both Θ(2^n); callers
/// cap `n` (around 20) before invoking this.
pub fn solve_exhaustive(actions: &[Action], max_budget: Budget) -> ExhaustiveResult {
    if actions.is_empty() {
        return ExhaustiveResult {
            selection: Selection::empty(),
            memory_mb: 0.0,
        };
    }
    let (all_combinations, memory_mb) = combinations::power_set_with_memory(actions);
    let mut best_combination: &[Action] = &[];
    let mut best_cost = 0.0;
    let mut best_benefit = 0.0;
    for combination in &all_combinations {
        if within_budget(combination, max_budget) {
            let benefit = portfolio_benefit(combination);
            if benefit > best_benefit {
                best_combination = combination;
                best_cost = portfolio_cost(combination);
                best_benefit = benefit;
            }
        }
    }
    ExhaustiveResult {
        selection: Selection {
            actions: best_combination.to_vec(),
            total_cost: best_cost,
            total_benefit: best_benefit,
        },
        memory_mb,
    }
}

/// Exhaustive search over subset bitmasks, holding no combination set.
///
/// Selection semantics and tie-break are identical to [`solve_exhaustive`];
/// use this variant to benchmark time without the exponential memory
/// footprint.
pub fn solve_exhaustive_streaming(actions: &[Action], max_budget: Budget) -> Selection {
    if actions.is_empty() {
        return Selection::empty();
    }
    let mut best_mask = 0u128;
    let mut best_benefit = 0.0;
    for mask in combinations::subset_masks(actions.len()) {
        let (cost, benefit) = combinations::subset_aggregates(actions, mask);
        if cost <= max_budget && benefit > best_benefit {
            best_mask = mask;
            best_benefit = benefit;
        }
    }
    Selection::from_actions(combinations::subset_for_mask(actions, best_mask))
}

/// The actions sorted by descending benefit/cost ratio.
///
/// The sort is stable, so actions with equal ratios keep their input order.
pub fn sorted_by_ratio(actions: &[Action]) -> Vec<Action> {
    actions
        .iter()
        .cloned()
        .sorted_by(|a, b| {
            b.ratio
                .partial_cmp(&a.ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .collect_vec()
}

/// Single-pass greedy heuristic: accept actions in descending ratio order
/// while the running cost stays within budget.
///
/// O(n log n). Not guaranteed optimal; its benefit never exceeds the one
/// [`solve_exhaustive`] finds for the same input.
pub fn solve_greedy(actions: &[Action], max_budget: Budget) -> Selection {
    accumulate(sorted_by_ratio(actions), max_budget)
}

/// A random budget-feasible selection, reproducible per seed.
///
/// Shuffles the catalogue and applies the same accumulation rule as the
/// greedy pass, as a baseline to compare the optimizers against.
pub fn random_selection(actions: &[Action], max_budget: Budget, seed: u64) -> Selection {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut shuffled = actions.to_vec();
    shuffled.shuffle(&mut rng);
    accumulate(shuffled, max_budget)
}

fn accumulate(ordered: Vec<Action>, max_budget: Budget) -> Selection {
    let mut selected = Vec::new();
    let mut total_cost = 0.0;
    let mut total_benefit = 0.0;
    for action in ordered {
        if total_cost + action.cost <= max_budget {
            total_cost += action.cost;
            total_benefit += action.benefit;
            selected.push(action);
        }
    }
    Selection {
        actions: selected,
        total_cost,
        total_benefit,
    }
}
