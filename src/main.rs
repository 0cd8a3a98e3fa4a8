use anyhow::Result;
use clap::Parser;
use log::{error, info, warn};
use std::fs;

use invest_solver::comparison::ReferenceTable;
use invest_solver::csv_parser;
use invest_solver::datastructures::*;
use invest_solver::profiler::{ExhaustiveProfile, GreedyProfile, ProfilingStrategy};
use invest_solver::solver;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();
    let config = {
        let config = match Config::from_cli(&args) {
            Ok(config) => config,
            Err(e) => {
                error!("{e:#}");
                std::process::exit(exitcode::CONFIG);
            }
        };
        CONFIG.set(config).ok();
        Config::global()
    };
    let max_budget = config.budget;
    let out_dir = &config.out_dir;
    fs::create_dir_all(out_dir).ok();

    let loaded = csv_parser::load_actions(&config.file)?;
    info!("{loaded}");
    for load_error in &loaded.errors {
        warn!("{load_error}");
    }
    for rejected in &loaded.rejected {
        info!("rejected {rejected}");
    }
    if loaded.valid.is_empty() {
        error!("no valid actions in {:?}", config.file);
        std::process::exit(exitcode::DATAERR);
    }
    serde_json::to_writer_pretty(
        fs::File::create(out_dir.join("rejected.json"))?,
        &loaded.rejected,
    )?;

    let greedy_profiler = GreedyProfile;
    let (greedy_selection, greedy_profile) = greedy_profiler.run(&loaded.valid, max_budget);
    info!("greedy selection:\n{greedy_selection}");
    info!("greedy profile: {greedy_profile}");
    serde_json::to_writer_pretty(
        fs::File::create(out_dir.join("selection_greedy.json"))?,
        &greedy_selection,
    )?;
    serde_json::to_writer_pretty(
        fs::File::create(out_dir.join("profile_greedy.json"))?,
        &greedy_profile.report(greedy_profiler.name()),
    )?;

    let mut best_benefit = greedy_selection.total_benefit;
    let mut best_cost = greedy_selection.total_cost;
    if loaded.valid.len() <= config.max_exhaustive_actions {
        let exhaustive = solver::solve_exhaustive(&loaded.valid, max_budget);
        info!("exhaustive selection:\n{}", exhaustive.selection);
        let exhaustive_profiler = ExhaustiveProfile;
        let exhaustive_profile = exhaustive_profiler.profile(&loaded.valid, max_budget);
        info!("exhaustive profile: {exhaustive_profile}");
        serde_json::to_writer_pretty(
            fs::File::create(out_dir.join("selection_exhaustive.json"))?,
            &exhaustive.selection,
        )?;
        serde_json::to_writer_pretty(
            fs::File::create(out_dir.join("profile_exhaustive.json"))?,
            &exhaustive_profile.report(exhaustive_profiler.name()),
        )?;
        best_benefit = exhaustive.selection.total_benefit;
        best_cost = exhaustive.selection.total_cost;
    } else {
        warn!(
            "{} valid actions exceed the exhaustive cap of {}, skipping the exhaustive search",
            loaded.valid.len(),
            config.max_exhaustive_actions
        );
    }

    if args.random_baseline {
        let random = solver::random_selection(&loaded.valid, max_budget, config.seed);
        info!(
            "random baseline: cost {:.2}, benefit {:.2}",
            random.total_cost, random.total_benefit
        );
    }

    let reference_table = match &config.reference {
        Some(path) => ReferenceTable::from_json(path)?,
        None => ReferenceTable::builtin(),
    };
    let dataset = config
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    if let Some(comparison) = reference_table.compare(&dataset, best_cost, best_benefit) {
        info!("comparison against reference decisions:\n{comparison}");
        serde_json::to_writer_pretty(
            fs::File::create(out_dir.join("comparison.json"))?,
            &comparison,
        )?;
    }
    Ok(())
}
