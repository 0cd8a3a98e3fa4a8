use crate::datastructures::{Action, Config};
use std::path::PathBuf;

pub fn action(name: &str, cost: f64, benefit_percent: f64) -> Action {
    Action::new(name.to_string(), cost, benefit_percent)
}

/// The three-action catalogue used throughout the solver tests.
pub fn sample_actions() -> Vec<Action> {
    vec![
        action("A", 100.0, 10.0),
        action("B", 200.0, 20.0),
        action("C", 50.0, 5.0),
    ]
}

/// `n` valid actions with distinct costs and ratios.
pub fn uniform_actions(n: usize) -> Vec<Action> {
    (1..=n)
        .map(|i| action(&format!("a{i}"), (10 * i) as f64, (5 + i) as f64))
        .collect()
}

pub fn default_config() -> Config {
    Config {
        file: PathBuf::from("data/test/actions_valid.csv"),
        budget: 500.0,
        out_dir: PathBuf::from("results"),
        max_exhaustive_actions: 20,
        reference: None,
        seed: 42,
    }
}
