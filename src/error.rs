// src/error.rs

use thiserror::Error;

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors raised while configuring the optimizer or moving plan data in and out.
///
/// Out-of-range numeric inputs and zero-cost rows are deliberately absent:
/// the former are clamped, the latter surface as a `DegenerateCostWarning`.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Optimizer or audit configuration is unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// An input row carries neither explicit unit costs nor catalog economics.
    #[error("no cost data for store {store_id}, product {product_id}")]
    MissingCosts { store_id: String, product_id: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
