pub mod config;
pub mod engine;
pub mod monte_carlo;

pub use config::{MonteCarloConfig, OptimizerConfig};
pub use engine::{FlaggedRow, PlanLine, ReplenishmentPlan, ReplenishmentPlanner};
pub use monte_carlo::{MonteCarloEstimator, SimulatedCosts};
