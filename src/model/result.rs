// src/model/result.rs

use crate::model::inventory::OptimizationInput;
use serde::Serialize;

/// Outcome of one Newsvendor optimization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// Order-up-to level Q*.
    pub target_quantity: f64,
    /// Units to order now: `max(0, Q* - stock_on_hand)`.
    pub suggested_order: f64,
    pub critical_fractile: f64,
    pub expected_shortage_cost: f64,
    pub expected_overstock_cost: f64,
    /// Equal to the critical fractile; not a simulated fill rate.
    pub approx_service_level: f64,
}

impl OptimizationResult {
    pub fn expected_total_cost(&self) -> f64 {
        self.expected_shortage_cost + self.expected_overstock_cost
    }
}

/// Which cost branch produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostRegime {
    /// Cu = Co = 0: ordered the forecast mean.
    Degenerate,
    /// Only Cu > 0: maximally aggressive.
    ShortageOnly,
    /// Only Co > 0: maximally conservative.
    OverstockOnly,
    Balanced,
}

/// Advisory signal for a row whose costs gave the optimizer nothing to trade off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegenerateCostWarning {
    /// The mean that was ordered up to in place of a Newsvendor quantile.
    pub fallback_quantity: f64,
}

impl std::fmt::Display for DegenerateCostWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "shortage and overstock costs are both zero; ordering up to the forecast mean {:.2}",
            self.fallback_quantity
        )
    }
}

/// A result together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// The clamped input the result was computed from.
    pub input: OptimizationInput,
    pub result: OptimizationResult,
    pub regime: CostRegime,
    pub warning: Option<DegenerateCostWarning>,
}
