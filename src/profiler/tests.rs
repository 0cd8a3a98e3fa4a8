use super::*;
use crate::solver;
use crate::test_utils::*;
use itertools::Itertools;

#[test]
fn test_exhaustive_series_shape() {
    let actions = uniform_actions(6);
    let profile = ExhaustiveProfile.profile(&actions, 150.0);
    assert_eq!(profile.n_values, (1..=6).collect_vec());
    assert_eq!(profile.times.len(), 6);
    assert_eq!(profile.memories.len(), 6);
    assert_eq!(profile.time_unit, TimeUnit::Seconds);
    assert!((profile.times.sum() - profile.total_time).abs() < 1e-9);
}

#[test]
fn test_exhaustive_memory_doubles_per_action() {
    let actions = uniform_actions(12);
    let profile = ExhaustiveProfile.profile(&actions, 200.0);
    // the combination set doubles with every action, so successive memory
    // samples approach a ratio of 2 once the constant outer overhead fades
    for n in 7..12 {
        let ratio = profile.memories[n] / profile.memories[n - 1];
        assert!(
            (1.9..2.5).contains(&ratio),
            "memory ratio {ratio} at n = {} outside exponential band",
            n + 1
        );
    }
    assert_eq!(profile.peak_memory, profile.memories[11]);
}

#[test]
fn test_exhaustive_prefix_samples_are_independent() {
    let actions = uniform_actions(7);
    let profile = ExhaustiveProfile.profile(&actions, 150.0);
    for n in [3, 5, 7] {
        let standalone = solver::solve_exhaustive(&actions[..n], 150.0);
        assert_eq!(profile.memories[n - 1], standalone.memory_mb);
    }
}

#[test]
fn test_exhaustive_profile_of_empty_catalogue() {
    let profile = ExhaustiveProfile.profile(&[], 100.0);
    assert!(profile.n_values.is_empty());
    assert_eq!(profile.total_time, 0.0);
    assert_eq!(profile.peak_memory, 0.0);
}

#[test]
fn test_greedy_discards_first_sample_as_baseline() {
    let actions = uniform_actions(8);
    let (_, profile) = GreedyProfile.run(&actions, 200.0);
    assert_eq!(profile.times[0], 0.0);
    assert_eq!(profile.time_unit, TimeUnit::Milliseconds);
}

#[test]
fn test_greedy_times_are_cumulative() {
    let actions = uniform_actions(10);
    let (_, profile) = GreedyProfile.run(&actions, 300.0);
    assert!(profile
        .times
        .iter()
        .tuple_windows()
        .all(|(a, b)| a <= b));
    assert_eq!(profile.total_time, profile.times[profile.times.len() - 1]);
}

#[test]
fn test_greedy_memory_tracks_the_selection_only() {
    let actions = uniform_actions(10);
    let (selection, profile) = GreedyProfile.run(&actions, 300.0);
    assert!(profile
        .memories
        .iter()
        .tuple_windows()
        .all(|(a, b)| a <= b));
    assert_eq!(
        profile.peak_memory,
        crate::combinations::selection_memory_mb(&selection.actions)
    );
}

#[test]
fn test_greedy_run_selection_matches_solver() {
    let actions = uniform_actions(10);
    let (selection, _) = GreedyProfile.run(&actions, 300.0);
    assert_eq!(selection, solver::solve_greedy(&actions, 300.0));
}

#[test]
fn test_report_projection() {
    let actions = uniform_actions(5);
    let profile = ExhaustiveProfile.profile(&actions, 100.0);
    let report = profile.report(ExhaustiveProfile.name());
    assert_eq!(report.strategy, "exhaustive");
    assert_eq!(report.time_unit, "s");
    assert_eq!(ExhaustiveProfile.time_unit(), TimeUnit::Seconds);
    assert_eq!(GreedyProfile.time_unit(), TimeUnit::Milliseconds);
    assert_eq!(report.n_values, profile.n_values);
    assert_eq!(report.memories_mb, profile.memories.to_vec());
}
