// src/simulation/monte_carlo.rs

//! Simulated expected cost of holding a given quantity.
//!
//! This is an audit of the closed-form loss-function costs, not a source of
//! plan numbers. Demand is drawn from the forecast normal, truncated at zero,
//! so the estimate drifts from the closed form when the mean sits within a
//! few standard deviations of zero.

use crate::model::OptimizationInput;
use crate::simulation::config::MonteCarloConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Sample means of the two cost sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedCosts {
    pub expected_shortage_cost: f64,
    pub expected_overstock_cost: f64,
}

impl SimulatedCosts {
    pub fn total(&self) -> f64 {
        self.expected_shortage_cost + self.expected_overstock_cost
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MonteCarloEstimator {
    config: MonteCarloConfig,
}

impl MonteCarloEstimator {
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Estimates the expected costs of stocking `quantity` against `input`'s demand.
    ///
    /// `input` should already be normalized. A seeded config restarts the same
    /// stream for every call, so each row is reproducible on its own.
    pub fn estimate(&self, input: &OptimizationInput, quantity: f64) -> SimulatedCosts {
        let mut rng = match self.config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (mut shortage_total, mut overstock_total) = (0.0, 0.0);
        match Normal::new(input.mu_week, input.sigma_week) {
            Ok(demand) => {
                for _ in 0..self.config.samples() {
                    let realized: f64 = demand.sample(&mut rng).max(0.0);
                    if realized > quantity {
                        shortage_total += (realized - quantity) * input.unit_shortage_cost;
                    } else {
                        overstock_total += (quantity - realized) * input.unit_overstock_cost;
                    }
                }
            }
            // Unusable spread: demand collapses to its (non-negative) mean.
            Err(_) => {
                let realized = input.mu_week.max(0.0);
                let n = self.config.samples() as f64;
                if realized > quantity {
                    shortage_total = (realized - quantity) * input.unit_shortage_cost * n;
                } else {
                    overstock_total = (quantity - realized) * input.unit_overstock_cost * n;
                }
            }
        }

        let n = self.config.samples() as f64;
        SimulatedCosts {
            expected_shortage_cost: shortage_total / n,
            expected_overstock_cost: overstock_total / n,
        }
    }
}
