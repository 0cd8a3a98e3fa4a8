use core::fmt;
use ndarray::Array1;
use serde::Serialize;
use std::time::Instant;

use crate::combinations;
use crate::datastructures::*;
use crate::solver;

#[cfg(test)]
mod tests;

/// Unit of the time series of one profiling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "s"),
            TimeUnit::Milliseconds => write!(f, "ms"),
        }
    }
}

/// Complexity curves of one strategy: for every prefix length `n` of the
/// catalogue, the measured time and estimated memory footprint.
///
/// The three series have equal length and `n_values` is `1..=n`.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub n_values: Vec<u32>,
    pub times: Array1<f64>,
    pub memories: Array1<f64>,
    pub total_time: f64,
    pub peak_memory: f64,
    pub time_unit: TimeUnit,
}

impl ProfileResult {
    /// Serializable projection for the json report files.
    pub fn report(&self, strategy: &str) -> ProfileReport {
        ProfileReport {
            strategy: strategy.to_string(),
            n_values: self.n_values.clone(),
            times: self.times.to_vec(),
            time_unit: self.time_unit.to_string(),
            memories_mb: self.memories.to_vec(),
            total_time: self.total_time,
            peak_memory_mb: self.peak_memory,
        }
    }
}

impl fmt::Display for ProfileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, total time: {:.4} {}, peak memory: {:.4} MB",
            self.n_values.len(),
            self.total_time,
            self.time_unit,
            self.peak_memory
        )
    }
}

/// Flat, serializable form of a [`ProfileResult`].
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub strategy: String,
    pub n_values: Vec<u32>,
    pub times: Vec<f64>,
    pub time_unit: String,
    pub memories_mb: Vec<f64>,
    pub total_time: f64,
    pub peak_memory_mb: f64,
}

/// A named way of measuring one optimizer across growing input prefixes.
///
/// Profiling never mutates the catalogue; the sample for prefix `n` is
/// independent of the samples taken for other prefix lengths.
pub trait ProfilingStrategy {
    fn name(&self) -> &'static str;
    fn time_unit(&self) -> TimeUnit;
    fn profile(&self, actions: &[Action], max_budget: Budget) -> ProfileResult;
}

/// Re-runs the exhaustive search on every prefix `1..=n` of the catalogue.
///
/// Times are per-call wall-clock seconds, the memory figure is the
/// combination-set footprint reported by the search itself. `total_time`
/// sums the samples, `peak_memory` is their maximum.
pub struct ExhaustiveProfile;

impl ProfilingStrategy for ExhaustiveProfile {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn time_unit(&self) -> TimeUnit {
        TimeUnit::Seconds
    }

    fn profile(&self, actions: &[Action], max_budget: Budget) -> ProfileResult {
        let mut n_values = Vec::with_capacity(actions.len());
        let mut times = Vec::with_capacity(actions.len());
        let mut memories = Vec::with_capacity(actions.len());
        let mut total_time = 0.0;
        let mut peak_memory: f64 = 0.0;
        for n in 1..=actions.len() {
            let prefix = &actions[..n];
            let start = Instant::now();
            let result = solver::solve_exhaustive(prefix, max_budget);
            let elapsed = start.elapsed().as_secs_f64();
            n_values.push(n as u32);
            times.push(elapsed);
            memories.push(result.memory_mb);
            total_time += elapsed;
            peak_memory = peak_memory.max(result.memory_mb);
        }
        ProfileResult {
            n_values,
            times: Array1::from_vec(times),
            memories: Array1::from_vec(memories),
            total_time,
            peak_memory,
            time_unit: TimeUnit::Seconds,
        }
    }
}

/// Times the greedy accumulation loop itself, one sample per considered
/// action, in cumulative milliseconds.
///
/// The very first sample only initializes a warm-up baseline and contributes
/// zero to the cumulative sum; it is discarded as calibration noise, not
/// accumulated. The memory figure per step is the footprint of the
/// accumulated selection only, no combination set exists on this path.
pub struct GreedyProfile;

impl GreedyProfile {
    /// Profile the accumulation loop and return the selection it built
    /// alongside the curves.
    pub fn run(&self, actions: &[Action], max_budget: Budget) -> (Selection, ProfileResult) {
        let ordered = solver::sorted_by_ratio(actions);
        let mut selected: Vec<Action> = Vec::new();
        let mut total_cost = 0.0;
        let mut total_benefit = 0.0;
        let mut n_values = Vec::with_capacity(ordered.len());
        let mut times = Vec::with_capacity(ordered.len());
        let mut memories = Vec::with_capacity(ordered.len());
        let mut cumulative_ms = 0.0;
        let mut baseline_initialized = false;
        let mut peak_memory: f64 = 0.0;
        for (index, action) in ordered.into_iter().enumerate() {
            let start = Instant::now();
            if total_cost + action.cost <= max_budget {
                total_cost += action.cost;
                total_benefit += action.benefit;
                selected.push(action);
            }
            let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;
            if baseline_initialized {
                cumulative_ms += elapsed_ms;
            } else {
                baseline_initialized = true;
            }
            let memory = combinations::selection_memory_mb(&selected);
            n_values.push(index as u32 + 1);
            times.push(cumulative_ms);
            memories.push(memory);
            peak_memory = peak_memory.max(memory);
        }
        let selection = Selection {
            actions: selected,
            total_cost,
            total_benefit,
        };
        let result = ProfileResult {
            n_values,
            times: Array1::from_vec(times),
            memories: Array1::from_vec(memories),
            total_time: cumulative_ms,
            peak_memory,
            time_unit: TimeUnit::Milliseconds,
        };
        (selection, result)
    }
}

impl ProfilingStrategy for GreedyProfile {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn time_unit(&self) -> TimeUnit {
        TimeUnit::Milliseconds
    }

    fn profile(&self, actions: &[Action], max_budget: Budget) -> ProfileResult {
        self.run(actions, max_budget).1
    }
}
