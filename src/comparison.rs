use anyhow::{Context, Result};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A known-good decision for one dataset, used as a comparison yardstick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReferenceDecision {
    pub total_cost: f64,
    pub total_return: f64,
}

/// Lookup of reference decisions by dataset file name.
///
/// Configuration data, not engine logic: the builtin table carries the two
/// historical datasets, any other table can be injected from json.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReferenceTable {
    pub decisions: HashMap<String, ReferenceDecision>,
}

impl ReferenceTable {
    /// The hard-coded decisions for the two historical datasets.
    pub fn builtin() -> Self {
        let decisions = HashMap::from([
            (
                "dataset_1.csv".to_string(),
                ReferenceDecision {
                    total_cost: 498.76,
                    total_return: 196.61,
                },
            ),
            (
                "dataset_2.csv".to_string(),
                ReferenceDecision {
                    total_cost: 489.24,
                    total_return: 193.78,
                },
            ),
        ]);
        Self { decisions }
    }

    pub fn from_json(path: &Path) -> Result<Self> {
        let table_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read reference table {path:?}"))?;
        serde_json::from_str(&table_str)
            .with_context(|| format!("failed to parse reference table {path:?}"))
    }

    /// Compare our result against the reference decision for `dataset`,
    /// `None` when the dataset has no reference entry.
    pub fn compare(
        &self,
        dataset: &str,
        total_cost: f64,
        total_benefit: f64,
    ) -> Option<Comparison> {
        let reference = self.decisions.get(dataset)?;
        let our_roi = if total_cost > 0.0 {
            total_benefit / total_cost * 100.0
        } else {
            0.0
        };
        let reference_roi = reference.total_return / reference.total_cost * 100.0;
        Some(Comparison {
            dataset: dataset.to_string(),
            // positive cost difference means we spent less than the reference
            cost: ComparisonMetric {
                ours: total_cost,
                reference: reference.total_cost,
                difference_percent: (reference.total_cost - total_cost) / reference.total_cost
                    * 100.0,
            },
            benefit: ComparisonMetric {
                ours: total_benefit,
                reference: reference.total_return,
                difference_percent: (total_benefit - reference.total_return)
                    / reference.total_return
                    * 100.0,
            },
            // roi difference is in percentage points, not relative
            roi: ComparisonMetric {
                ours: our_roi,
                reference: reference_roi,
                difference_percent: our_roi - reference_roi,
            },
        })
    }
}

/// One compared quantity: our value, the reference value and the difference
/// in percent.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComparisonMetric {
    pub ours: f64,
    pub reference: f64,
    pub difference_percent: f64,
}

/// Cost, benefit and roi of our selection next to a reference decision.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Comparison {
    pub dataset: String,
    pub cost: ComparisonMetric,
    pub benefit: ComparisonMetric,
    pub roi: ComparisonMetric,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "cost: {:.2} vs {:.2} ({:+.1}%)",
            self.cost.ours, self.cost.reference, self.cost.difference_percent
        )?;
        writeln!(
            f,
            "benefit: {:.2} vs {:.2} ({:+.1}%)",
            self.benefit.ours, self.benefit.reference, self.benefit.difference_percent
        )?;
        write!(
            f,
            "roi: {:.1}% vs {:.1}% ({:+.1} points)",
            self.roi.ours, self.roi.reference, self.roi.difference_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_comparison() {
        let table = ReferenceTable::builtin();
        let comparison = table.compare("dataset_1.csv", 480.0, 190.0).unwrap();
        assert!((comparison.cost.difference_percent - 3.7613).abs() < 1e-3);
        assert!((comparison.benefit.difference_percent + 3.3620).abs() < 1e-3);
        let our_roi = 190.0 / 480.0 * 100.0;
        let reference_roi = 196.61 / 498.76 * 100.0;
        assert!((comparison.roi.difference_percent - (our_roi - reference_roi)).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_dataset_has_no_comparison() {
        let table = ReferenceTable::builtin();
        assert_eq!(table.compare("unknown.csv", 100.0, 10.0), None);
    }

    #[test]
    fn test_zero_cost_roi_falls_back_to_zero() {
        let table = ReferenceTable::builtin();
        let comparison = table.compare("dataset_2.csv", 0.0, 0.0).unwrap();
        assert_eq!(comparison.roi.ours, 0.0);
    }
}
