// src/strategy/traits.rs

use crate::model::{Evaluation, OptimizationInput};
use std::fmt::Debug;

/// Decides how much stock a SKU-store should hold and order.
///
/// Implementations are stateless between calls so rows can be evaluated on
/// any thread and in any order; hence `&self` and `Send + Sync`.
pub trait ReplenishmentPolicy: Debug + Send + Sync {
    /// Evaluates one SKU-store.
    ///
    /// Must not fail: out-of-range inputs are clamped and degenerate costs
    /// are reported through [`Evaluation::warning`].
    fn evaluate(&self, input: &OptimizationInput) -> Evaluation;
}
