//! Weekly replenishment planning for SKU-store pairs.
//!
//! A probabilistic demand forecast (mean and standard deviation) plus unit
//! economics go in; a Newsvendor order-up-to level, the order net of stock
//! and the expected shortage / overstock costs come out.
//!
//! ```
//! use replenishment_planner::strategy::NewsvendorOptimizer;
//!
//! let optimizer = NewsvendorOptimizer::default();
//! let result = optimizer.compute_order_quantity(100.0, 20.0, 30.0, 1500.0, 50.0);
//! assert!(result.target_quantity > 100.0);
//! assert!(result.suggested_order < result.target_quantity);
//! ```

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{PlannerError, Result};
