pub mod newsvendor;
pub mod optimization;
pub mod traits;

pub use newsvendor::NewsvendorOptimizer;
pub use traits::ReplenishmentPolicy;
