#![warn(missing_docs)]
//! Select the subset of investment actions that maximizes total benefit
//! within a fixed budget.
//!
//! Provides an exhaustive optimizer that is provably optimal but exponential
//! in time and space, a linear greedy heuristic, and profiling strategies
//! that measure both across growing input prefixes to produce empirical
//! complexity curves. Helper modules cover csv loading of action catalogues
//! and comparison against known-good reference decisions.
//!
//! The exhaustive search materializes all `2^n` subsets on purpose, the
//! profiler observes exactly that growth. Callers cap `n` (around 20)
//! before invoking it; the streaming variant trades the combination set for
//! a bitmask scan when only time matters.
//!
//! Example
//! ```rust
//! use invest_solver::csv_parser;
//! use invest_solver::profiler::{ExhaustiveProfile, ProfilingStrategy};
//! use invest_solver::solver;
//! # use anyhow::Result;
//! # use std::path::Path;
//!
//! fn example() -> Result<()> {
//!     let max_budget = 500.0;
//!     let loaded = csv_parser::load_actions(Path::new("data/actions.csv"))?;
//!     for rejected in &loaded.rejected {
//!         eprintln!("skipped {rejected}");
//!     }
//!
//!     let best = solver::solve_exhaustive(&loaded.valid, max_budget);
//!     println!("{}", best.selection);
//!
//!     let heuristic = solver::solve_greedy(&loaded.valid, max_budget);
//!     assert!(heuristic.total_benefit <= best.selection.total_benefit);
//!
//!     let profile = ExhaustiveProfile.profile(&loaded.valid, max_budget);
//!     println!("{profile}");
//!     Ok(())
//! }
//! ```

/// Power-set enumeration and the memory estimates of both strategies.
pub mod combinations;

/// Comparison of a selection against known-good reference decisions.
pub mod comparison;

/// Csv loading and validation of action catalogues.
pub mod csv_parser;

/// Data structures shared by the loader, the solvers and the binaries.
pub mod datastructures;

/// Profiling strategies measuring time and memory across input prefixes.
pub mod profiler;

/// The exhaustive and greedy optimizers.
pub mod solver;

#[cfg(test)]
mod test_utils;
