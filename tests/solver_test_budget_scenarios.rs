use invest_solver::solver;
use itertools::Itertools;
mod common;
use common::*;

#[test]
fn test_full_budget_selects_a_and_b() {
    let result = solver::solve_exhaustive(&sample_actions(), 300.0);
    assert_eq!(
        result.selection.actions.iter().map(|a| &a.name).collect_vec(),
        vec!["A", "B"]
    );
    assert_eq!(result.selection.total_cost, 300.0);
    assert_eq!(result.selection.total_benefit, 50.0);
}

#[test]
fn test_tight_budget_selects_c() {
    let result = solver::solve_exhaustive(&sample_actions(), 50.0);
    assert_eq!(
        result.selection.actions.iter().map(|a| &a.name).collect_vec(),
        vec!["C"]
    );
    assert_eq!(result.selection.total_benefit, 2.5);
}

#[test]
fn test_empty_catalogue_yields_empty_selection() {
    let exhaustive = solver::solve_exhaustive(&[], 300.0);
    let greedy = solver::solve_greedy(&[], 300.0);
    assert!(exhaustive.selection.actions.is_empty());
    assert_eq!(exhaustive.selection.total_benefit, 0.0);
    assert!(greedy.actions.is_empty());
    assert_eq!(greedy.total_cost, 0.0);
}
