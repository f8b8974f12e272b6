// src/model/inventory.rs

use crate::error::{PlannerError, Result};
use serde::Deserialize;

/// Mean assumed for a SKU-store that has no forecast at all.
pub const MISSING_MEAN_DEFAULT: f64 = 0.0;
/// Standard deviation assumed for a SKU-store that has no forecast at all.
pub const MISSING_SIGMA_DEFAULT: f64 = 1.0;

/// The five numbers the optimizer needs for one SKU-store in one week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationInput {
    /// Forecasted mean weekly demand.
    pub mu_week: f64,
    /// Forecasted weekly demand standard deviation.
    pub sigma_week: f64,
    /// Units currently on hand.
    pub stock_on_hand: f64,
    /// Cu: margin lost per unit of unmet demand.
    pub unit_shortage_cost: f64,
    /// Co: cost of carrying one surplus unit for a week.
    pub unit_overstock_cost: f64,
}

impl OptimizationInput {
    pub fn new(
        mu_week: f64,
        sigma_week: f64,
        stock_on_hand: f64,
        unit_shortage_cost: f64,
        unit_overstock_cost: f64,
    ) -> Self {
        Self {
            mu_week,
            sigma_week,
            stock_on_hand,
            unit_shortage_cost,
            unit_overstock_cost,
        }
    }

    /// Clamps every field into its valid domain.
    ///
    /// `f64::max` returns the non-NaN operand, so NaN fields land on the floor
    /// of their domain as well. Infinities are pulled back to `f64::MAX`.
    pub fn normalized(&self, sigma_min: f64) -> Self {
        Self {
            mu_week: self.mu_week.max(0.0).min(f64::MAX),
            sigma_week: self.sigma_week.max(sigma_min).min(f64::MAX),
            stock_on_hand: self.stock_on_hand.max(0.0).min(f64::MAX),
            unit_shortage_cost: self.unit_shortage_cost.max(0.0).min(f64::MAX),
            unit_overstock_cost: self.unit_overstock_cost.max(0.0).min(f64::MAX),
        }
    }
}

/// Catalog economics of a product, from which Cu and Co are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitEconomics {
    pub unit_cost: f64,
    pub sale_price: f64,
    pub weekly_storage_cost: f64,
}

impl UnitEconomics {
    /// Margin forgone on each unit of demand we fail to serve.
    pub fn shortage_cost(&self) -> f64 {
        (self.sale_price - self.unit_cost).max(0.0)
    }

    /// Purchase plus one week of storage for each unit left over.
    pub fn overstock_cost(&self) -> f64 {
        (self.unit_cost + self.weekly_storage_cost).max(0.0)
    }
}

/// Where a row's unit costs come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostSource {
    Explicit { shortage: f64, overstock: f64 },
    Catalog(UnitEconomics),
}

impl CostSource {
    pub fn unit_costs(&self) -> (f64, f64) {
        match self {
            CostSource::Explicit {
                shortage,
                overstock,
            } => (*shortage, *overstock),
            CostSource::Catalog(economics) => {
                (economics.shortage_cost(), economics.overstock_cost())
            }
        }
    }
}

/// One joined SKU-store row: forecast, stock and costs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningRow {
    pub store_id: String,
    pub product_id: String,
    /// `None` when the forecaster produced nothing for this pair.
    pub mu_week: Option<f64>,
    pub sigma_week: Option<f64>,
    pub stock_on_hand: f64,
    pub costs: CostSource,
}

impl PlanningRow {
    /// Builds the optimizer input, substituting the missing-forecast defaults.
    pub fn to_input(&self) -> OptimizationInput {
        let (shortage, overstock) = self.costs.unit_costs();
        OptimizationInput::new(
            self.mu_week.unwrap_or(MISSING_MEAN_DEFAULT),
            self.sigma_week.unwrap_or(MISSING_SIGMA_DEFAULT),
            self.stock_on_hand,
            shortage,
            overstock,
        )
    }
}

/// Flat CSV shape of a planning row. Every numeric column may be blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanningRecord {
    pub store_id: String,
    pub product_id: String,
    pub mu_week: Option<f64>,
    pub sigma_week: Option<f64>,
    pub stock_on_hand: Option<f64>,
    pub unit_shortage_cost: Option<f64>,
    pub unit_overstock_cost: Option<f64>,
    pub unit_cost: Option<f64>,
    pub sale_price: Option<f64>,
    pub weekly_storage_cost: Option<f64>,
}

impl TryFrom<PlanningRecord> for PlanningRow {
    type Error = PlannerError;

    fn try_from(record: PlanningRecord) -> Result<Self> {
        // Explicit costs win over catalog economics when both are present.
        let costs = match (
            record.unit_shortage_cost,
            record.unit_overstock_cost,
            record.unit_cost,
            record.sale_price,
        ) {
            (Some(shortage), Some(overstock), _, _) => CostSource::Explicit {
                shortage,
                overstock,
            },
            (_, _, Some(unit_cost), Some(sale_price)) => CostSource::Catalog(UnitEconomics {
                unit_cost,
                sale_price,
                weekly_storage_cost: record.weekly_storage_cost.unwrap_or(0.0),
            }),
            _ => {
                return Err(PlannerError::MissingCosts {
                    store_id: record.store_id,
                    product_id: record.product_id,
                })
            }
        };

        Ok(Self {
            store_id: record.store_id,
            product_id: record.product_id,
            mu_week: record.mu_week,
            sigma_week: record.sigma_week,
            // No inventory record means nothing on the shelf.
            stock_on_hand: record.stock_on_hand.unwrap_or(0.0),
            costs,
        })
    }
}
