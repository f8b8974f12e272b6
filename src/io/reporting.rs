// src/io/reporting.rs

use crate::error::Result;
use crate::simulation::engine::ReplenishmentPlan;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the plan lines to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "plans/week_42.csv").
/// * `plan` - The plan produced by the replenishment planner.
pub fn write_plan(file_path: impl AsRef<Path>, plan: &ReplenishmentPlan) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_plan_to_writer(file, plan)?;

    info!(
        "Successfully exported {} rows to {:?}",
        plan.lines.len(),
        path
    );
    Ok(())
}

/// Serializes every plan line, header first, to any writer.
pub fn write_plan_to_writer<W: Write>(writer: W, plan: &ReplenishmentPlan) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for line in &plan.lines {
        wtr.serialize(line)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Logs the plan totals and the regime mix.
pub fn log_summary(plan: &ReplenishmentPlan) {
    info!("SKU-stores planned: {}", plan.lines.len());
    info!("Total units to order: {:.0}", plan.total_units());
    info!("Total expected cost: ${:.2}", plan.total_expected_cost());
    for (regime, count) in plan.regime_breakdown() {
        info!("{:?}: {}", regime, count);
    }
    if !plan.warnings.is_empty() {
        info!(
            "{} SKU-stores had no cost signal and were planned at the forecast mean",
            plan.warnings.len()
        );
    }
}
