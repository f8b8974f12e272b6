// src/io/forecast.rs

use crate::error::Result;
use crate::model::{PlanningRecord, PlanningRow};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Reads joined forecast / stock / cost rows from a CSV file.
///
/// # Arguments
/// * `file_path` - CSV with a header row (see [`read_planning_rows_from_reader`]).
pub fn read_planning_rows(file_path: impl AsRef<Path>) -> Result<Vec<PlanningRow>> {
    let path = file_path.as_ref();
    let file = std::fs::File::open(path)?;
    let rows = read_planning_rows_from_reader(file)?;
    info!("Loaded {} SKU-store rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Reads planning rows from any CSV source.
///
/// Expected headers: `store_id, product_id, mu_week, sigma_week,
/// stock_on_hand, unit_shortage_cost, unit_overstock_cost, unit_cost,
/// sale_price, weekly_storage_cost`. Numeric cells may be blank and
/// missing columns count as blank. A row needs either both unit costs or a
/// unit cost and sale price.
pub fn read_planning_rows_from_reader<R: Read>(reader: R) -> Result<Vec<PlanningRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize::<PlanningRecord>() {
        rows.push(PlanningRow::try_from(record?)?);
    }
    Ok(rows)
}
