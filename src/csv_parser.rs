use polars::prelude::*;
use std::path::Path;

use anyhow::{Context, Result};

use crate::datastructures::{Action, LoadedActions, RejectedAction};


/// Load and validate an action catalogue from a csv file.
///
/// The file needs a header row and at least three columns: name, cost and
/// benefit percent (a trailing `%` on the benefit cell is tolerated). Every
/// column is read as text so this loader owns the numeric parsing per row:
/// a cell that fails to parse skips the row and records an error naming it,
/// while rows that parse but violate the validity invariants become
/// rejected actions with their reasons. Only an unreadable file is returned
/// as `Err`; structural and per-row problems are data.
pub fn load_actions(path: &Path) -> Result<LoadedActions> {
    let df = CsvReader::from_path(path)
        .with_context(|| format!("failed to open actions file {path:?}"))?
        .has_header(true)
        .infer_schema(Some(0))
        .finish()
        .with_context(|| format!("failed to read actions file {path:?}"))?;
    let mut loaded = LoadedActions::default();
    if df.width() < 3 {
        loaded.errors.push(format!(
            "the csv file must contain at least three columns: name, cost and benefit percent (found {})",
            df.width()
        ));
        return Ok(loaded);
    }
    let columns = df.get_columns();
    let names = columns[0].utf8()?;
    let costs = columns[1].utf8()?;
    let benefits = columns[2].utf8()?;
    for row in 0..df.height() {
        let name = names.get(row).unwrap_or("").trim().to_string();
        let cost = match parse_cell(costs.get(row)) {
            Ok(cost) => cost,
            Err(cell) => {
                loaded
                    .errors
                    .push(format!("row {}, {name}: invalid cost {cell:?}", row + 1));
                continue;
            }
        };
        let benefit_percent = match parse_cell(benefits.get(row)) {
            Ok(benefit_percent) => benefit_percent,
            Err(cell) => {
                loaded.errors.push(format!(
                    "row {}, {name}: invalid benefit percent {cell:?}",
                    row + 1
                ));
                continue;
            }
        };
        let action = Action::new(name, cost, benefit_percent);
        if action.is_valid() {
            loaded.valid.push(action);
        } else {
            let reasons = action.invalid_reasons();
            loaded.rejected.push(RejectedAction { action, reasons });
        }
    }
    Ok(loaded)
}

/// Parse a numeric cell, tolerating surrounding whitespace and one trailing
/// `%`. The offending cell text is returned on failure.
fn parse_cell(cell: Option<&str>) -> Result<f64, String> {
    let raw = cell.ok_or_else(|| String::from("<missing>"))?;
    let trimmed = raw.trim();
    let without_suffix = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    without_suffix
        .parse::<f64>()
        .map_err(|_| raw.to_string())
}

/// Write a generated action dataframe as csv, for the dataset generator.
pub fn df_to_actions_csv(mut df: DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("failed to create output file {path:?}"))?;
    CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;
    Ok(())
}
