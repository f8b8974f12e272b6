pub mod inventory;
pub mod result;

pub use inventory::{CostSource, OptimizationInput, PlanningRecord, PlanningRow, UnitEconomics};
pub use result::{CostRegime, DegenerateCostWarning, Evaluation, OptimizationResult};
