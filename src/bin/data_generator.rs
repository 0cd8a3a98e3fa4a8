use clap::Parser;
use polars::prelude::*;
use std::{fs, path::PathBuf};

use anyhow::Result;
use invest_solver::csv_parser;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
struct DataGeneratorConfig {
    num_actions: usize,
    cost_mean: f64,
    cost_std: f64,
    min_benefit_percent: f64,
    max_benefit_percent: f64,
    /// Fraction of rows with a non-positive cost or benefit.
    invalid_fraction: f64,
    /// Fraction of rows with a non-numeric cost cell.
    malformed_fraction: f64,
    seed: u64,
    out_path: PathBuf,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the json config
    #[arg(short, long)]
    pub config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config: DataGeneratorConfig = serde_json::from_str(&fs::read_to_string(args.config)?)?;
    let out_path = config.out_path.clone();
    let dataframe = generate_actions(config)?;
    csv_parser::df_to_actions_csv(dataframe, &out_path)?;
    Ok(())
}

fn generate_actions(config: DataGeneratorConfig) -> Result<DataFrame> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let cost_distribution = Normal::new(config.cost_mean, config.cost_std.abs())?;
    let mut names = Vec::with_capacity(config.num_actions);
    let mut costs = Vec::with_capacity(config.num_actions);
    let mut benefits = Vec::with_capacity(config.num_actions);
    for i in 0..config.num_actions {
        names.push(format!("action_{i}"));
        let roll: f64 = rng.gen();
        if roll < config.malformed_fraction {
            costs.push(String::from("n/a"));
            benefits.push(format!(
                "{:.2}",
                rng.gen_range(config.min_benefit_percent..=config.max_benefit_percent)
            ));
        } else if roll < config.malformed_fraction + config.invalid_fraction {
            // alternate between the two validity violations
            if i % 2 == 0 {
                costs.push(format!("{:.2}", -cost_distribution.sample(&mut rng).abs()));
                benefits.push(format!(
                    "{:.2}",
                    rng.gen_range(config.min_benefit_percent..=config.max_benefit_percent)
                ));
            } else {
                costs.push(format!("{:.2}", cost_distribution.sample(&mut rng).abs()));
                benefits.push(String::from("0"));
            }
        } else {
            costs.push(format!(
                "{:.2}",
                cost_distribution.sample(&mut rng).abs().max(1.0)
            ));
            benefits.push(format!(
                "{:.2}%",
                rng.gen_range(config.min_benefit_percent..=config.max_benefit_percent)
            ));
        }
    }
    Ok(df! {
        "name" => names,
        "cost" => costs,
        "benefit_percent" => benefits,
    }?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::{generate_actions, DataGeneratorConfig};

    fn test_config() -> DataGeneratorConfig {
        DataGeneratorConfig {
            num_actions: 40,
            cost_mean: 50.0,
            cost_std: 15.0,
            min_benefit_percent: 1.0,
            max_benefit_percent: 25.0,
            invalid_fraction: 0.1,
            malformed_fraction: 0.05,
            seed: 42,
            out_path: PathBuf::new(),
        }
    }

    #[test]
    fn test_generate_actions() {
        let data = generate_actions(test_config()).unwrap();
        assert_eq!(data.height(), 40);
        assert_eq!(data.width(), 3);
    }

    #[test]
    fn test_generation_is_seeded() {
        let first = generate_actions(test_config()).unwrap();
        let second = generate_actions(test_config()).unwrap();
        assert!(first.frame_equal(&second));
    }
}
