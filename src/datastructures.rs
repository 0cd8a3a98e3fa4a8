use anyhow::{ensure, Context, Result};
use clap::Parser;
use core::fmt;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Maximum total cost allowed for a selection.
pub type Budget = f64;

/// Global configuration, set once at startup by the binaries.
pub static CONFIG: OnceCell<Config> = OnceCell::new();

/// A candidate investment with its derived benefit and cost/benefit ratio.
///
/// Immutable after construction, the derived fields are computed once in
/// [`Action::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub name: String,
    pub cost: f64,
    pub benefit_percent: f64,
    pub benefit: f64,
    pub ratio: f64,
}

impl Action {
    pub fn new(name: String, cost: f64, benefit_percent: f64) -> Self {
        let benefit = cost * benefit_percent / 100.0;
        let ratio = if cost > 0.0 { benefit / cost } else { 0.0 };
        Self {
            name,
            cost,
            benefit_percent,
            benefit,
            ratio,
        }
    }

    /// An action is valid if both numeric fields are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.cost.is_finite()
            && self.benefit_percent.is_finite()
            && self.cost > 0.0
            && self.benefit_percent > 0.0
    }

    /// The violated invariants, empty for a valid action.
    ///
    /// A non-finite field short-circuits to a single `"invalid format"`
    /// reason, otherwise the reasons are additive.
    pub fn invalid_reasons(&self) -> Vec<String> {
        if !self.cost.is_finite() || !self.benefit_percent.is_finite() {
            return vec!["invalid format".to_string()];
        }
        let mut reasons = Vec::new();
        if self.cost <= 0.0 {
            reasons.push("cost <= 0".to_string());
        }
        if self.benefit_percent <= 0.0 {
            reasons.push("benefit% <= 0".to_string());
        }
        reasons
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (cost: {}, benefit: {}%)",
            self.name, self.cost, self.benefit_percent
        )
    }
}

/// Total cost of a set of actions.
pub fn portfolio_cost(actions: &[Action]) -> f64 {
    actions.iter().map(|a| a.cost).sum()
}

/// Total monetary benefit of a set of actions.
pub fn portfolio_benefit(actions: &[Action]) -> f64 {
    actions.iter().map(|a| a.benefit).sum()
}

/// Whether the total cost of `actions` stays within `max_budget`.
pub fn within_budget(actions: &[Action], max_budget: Budget) -> bool {
    portfolio_cost(actions) <= max_budget
}

/// The subset of actions an optimizer settled on, with its aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Selection {
    pub actions: Vec<Action>,
    pub total_cost: f64,
    pub total_benefit: f64,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a selection from already accepted actions.
    pub fn from_actions(actions: Vec<Action>) -> Self {
        let total_cost = portfolio_cost(&actions);
        let total_benefit = portfolio_benefit(&actions);
        Self {
            actions,
            total_cost,
            total_benefit,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{action}")?;
        }
        write!(
            f,
            "total cost: {:.2}, total benefit: {:.2}",
            self.total_cost, self.total_benefit
        )
    }
}

/// Result of the exhaustive search, including the footprint of the
/// materialized combination set in megabytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhaustiveResult {
    pub selection: Selection,
    pub memory_mb: f64,
}

/// An action that failed validation, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedAction {
    pub action: Action,
    pub reasons: Vec<String>,
}

impl fmt::Display for RejectedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.action.name, self.reasons.join(", "))
    }
}

/// Outcome of loading a csv catalogue: valid actions, rejected actions with
/// their reasons and non-fatal load errors.
#[derive(Debug, Default)]
pub struct LoadedActions {
    pub valid: Vec<Action>,
    pub rejected: Vec<RejectedAction>,
    pub errors: Vec<String>,
}

impl fmt::Display for LoadedActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} valid actions, {} rejected, {} load errors",
            self.valid.len(),
            self.rejected.len(),
            self.errors.len()
        )
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to a json config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Path to the actions csv file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Maximum total cost of the selection
    #[arg(short, long)]
    pub budget: Option<f64>,
    /// Output directory for the json result files
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
    /// Evaluate a random budget-feasible selection as a baseline
    #[arg(long)]
    pub random_baseline: bool,
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_max_exhaustive_actions() -> usize {
    20
}

fn default_seed() -> u64 {
    42
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Csv file with the action catalogue.
    pub file: PathBuf,
    /// Budget ceiling passed to every optimization call.
    pub budget: Budget,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// The exhaustive search materializes 2^n subsets, so the caller caps n.
    #[serde(default = "default_max_exhaustive_actions")]
    pub max_exhaustive_actions: usize,
    /// Optional json file with reference decisions to compare against.
    #[serde(default)]
    pub reference: Option<PathBuf>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Config {
    pub fn from_cli(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let config_str = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {path:?}"))?;
                serde_json::from_str(&config_str)
                    .with_context(|| format!("failed to parse config file {path:?}"))?
            }
            None => Self {
                file: PathBuf::new(),
                budget: 0.0,
                out_dir: default_out_dir(),
                max_exhaustive_actions: default_max_exhaustive_actions(),
                reference: None,
                seed: default_seed(),
            },
        };
        if let Some(file) = &args.file {
            config.file = file.clone();
        }
        if let Some(budget) = args.budget {
            config.budget = budget;
        }
        if let Some(out_dir) = &args.out_dir {
            config.out_dir = out_dir.clone();
        }
        ensure!(
            config.file.components().next().is_some(),
            "no actions csv file provided, use --file or a config file"
        );
        ensure!(config.budget >= 0.0, "the budget must be non-negative");
        Ok(config)
    }

    pub fn global() -> &'static Config {
        CONFIG.get().expect("config is not initialized")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use clap::Parser;

    #[test]
    fn test_config_from_cli() {
        let args = Args::try_parse_from([
            "invest_solver",
            "--file",
            "data/test/actions_valid.csv",
            "--budget",
            "500",
        ])
        .unwrap();
        let config = Config::from_cli(&args).unwrap();
        let expected = default_config();
        assert_eq!(config.file, expected.file);
        assert_eq!(config.budget, expected.budget);
        assert_eq!(config.max_exhaustive_actions, expected.max_exhaustive_actions);
    }

    #[test]
    fn test_config_rejects_missing_file() {
        let args = Args::try_parse_from(["invest_solver", "--budget", "500"]).unwrap();
        assert!(Config::from_cli(&args).is_err());
    }

    #[test]
    fn test_derived_fields() {
        let action = Action::new("A".to_string(), 100.0, 10.0);
        assert_eq!(action.benefit, 10.0);
        assert_eq!(action.ratio, 0.1);
        assert!(action.is_valid());
        assert!(action.invalid_reasons().is_empty());
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let action = Action::new("X".to_string(), -10.0, 5.0);
        assert!(!action.is_valid());
        assert_eq!(action.invalid_reasons(), vec!["cost <= 0".to_string()]);
        // derived ratio falls back to 0 for non-positive costs
        assert_eq!(action.ratio, 0.0);
    }

    #[test]
    fn test_zero_benefit_is_rejected() {
        let action = Action::new("Y".to_string(), 100.0, 0.0);
        assert!(!action.is_valid());
        assert_eq!(action.invalid_reasons(), vec!["benefit% <= 0".to_string()]);
    }

    #[test]
    fn test_reasons_are_additive() {
        let action = Action::new("Z".to_string(), 0.0, -1.0);
        assert_eq!(
            action.invalid_reasons(),
            vec!["cost <= 0".to_string(), "benefit% <= 0".to_string()]
        );
    }

    #[test]
    fn test_non_finite_fields_short_circuit() {
        let action = Action::new("N".to_string(), f64::NAN, -1.0);
        assert_eq!(action.invalid_reasons(), vec!["invalid format".to_string()]);
    }

    #[test]
    fn test_portfolio_aggregates() {
        let actions = vec![
            Action::new("A".to_string(), 100.0, 10.0),
            Action::new("B".to_string(), 200.0, 20.0),
        ];
        assert_eq!(portfolio_cost(&actions), 300.0);
        assert_eq!(portfolio_benefit(&actions), 50.0);
        assert!(within_budget(&actions, 300.0));
        assert!(!within_budget(&actions, 299.0));
    }
}
