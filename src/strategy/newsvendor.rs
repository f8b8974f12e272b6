// src/strategy/newsvendor.rs

use crate::error::Result;
use crate::model::{
    CostRegime, DegenerateCostWarning, Evaluation, OptimizationInput, OptimizationResult,
};
use crate::simulation::config::OptimizerConfig;
use crate::strategy::optimization::{critical_fractile, inverse_normal_cdf, normal_loss};
use crate::strategy::traits::ReplenishmentPolicy;
use tracing::warn;

/// Single-period Newsvendor optimizer.
///
/// The order-up-to level is the critical-fractile quantile of a normal
/// weekly demand forecast:
///
/// Q* = mu + z(p) * sigma, with p = Cu / (Cu + Co)
///
/// - p near 1: shortages hurt more than surplus, stock above the mean.
/// - p near 0.5: costs balance, stock near the mean.
/// - p near 0: surplus hurts more, stock below the mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NewsvendorOptimizer {
    config: OptimizerConfig,
}

impl NewsvendorOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Validates the bounds and builds an optimizer in one step.
    pub fn with_bounds(z_clip: (f64, f64), sigma_min: f64) -> Result<Self> {
        Ok(Self::new(OptimizerConfig::new(z_clip, sigma_min)?))
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Order quantity for one SKU-store.
    ///
    /// Logs a warning when both costs are zero; the mean-based result is
    /// still returned.
    pub fn compute_order_quantity(
        &self,
        mu_week: f64,
        sigma_week: f64,
        stock_on_hand: f64,
        unit_shortage_cost: f64,
        unit_overstock_cost: f64,
    ) -> OptimizationResult {
        let evaluation = self.evaluate(&OptimizationInput::new(
            mu_week,
            sigma_week,
            stock_on_hand,
            unit_shortage_cost,
            unit_overstock_cost,
        ));
        if let Some(warning) = evaluation.warning {
            warn!(
                fallback_quantity = warning.fallback_quantity,
                "{}", warning
            );
        }
        evaluation.result
    }

    /// z-score behind the target quantity. Degenerate rows order the mean, z = 0.
    fn z_score(&self, regime: CostRegime, fractile: f64) -> f64 {
        match regime {
            CostRegime::Degenerate => 0.0,
            CostRegime::ShortageOnly | CostRegime::OverstockOnly => inverse_normal_cdf(fractile),
            CostRegime::Balanced => {
                // The fractile is already clipped; the z-score gets its own bound.
                let (low, high) = self.config.z_clip();
                inverse_normal_cdf(fractile).clamp(low, high)
            }
        }
    }
}

impl ReplenishmentPolicy for NewsvendorOptimizer {
    fn evaluate(&self, input: &OptimizationInput) -> Evaluation {
        let input = input.normalized(self.config.sigma_min());
        let cu = input.unit_shortage_cost;
        let co = input.unit_overstock_cost;

        let regime = match (cu > 0.0, co > 0.0) {
            (false, false) => CostRegime::Degenerate,
            (true, false) => CostRegime::ShortageOnly,
            (false, true) => CostRegime::OverstockOnly,
            (true, true) => CostRegime::Balanced,
        };

        let fractile = critical_fractile(cu, co);
        let z = self.z_score(regime, fractile);

        let target_quantity = (input.mu_week + z * input.sigma_week).max(0.0);
        let suggested_order = (target_quantity - input.stock_on_hand).max(0.0);

        let expected_shortage_cost = if cu > 0.0 {
            cu * input.sigma_week * normal_loss(z)
        } else {
            0.0
        };
        let expected_overstock_cost = if co > 0.0 {
            co * input.sigma_week * normal_loss(-z)
        } else {
            0.0
        };

        let warning = match regime {
            CostRegime::Degenerate => Some(DegenerateCostWarning {
                fallback_quantity: target_quantity,
            }),
            _ => None,
        };

        Evaluation {
            input,
            result: OptimizationResult {
                target_quantity,
                suggested_order,
                critical_fractile: fractile,
                expected_shortage_cost,
                expected_overstock_cost,
                approx_service_level: fractile,
            },
            regime,
            warning,
        }
    }
}
