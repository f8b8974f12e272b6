// src/io/demand.rs

use crate::model::{CostSource, PlanningRow, UnitEconomics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Share of demo pairs generated without any forecast, as if the pair never sold.
const UNFORECAST_SHARE: f64 = 0.05;

/// Generates a synthetic store x product grid for running the planner without data.
///
/// Mean weekly demand per pair is drawn from a Normal (Bell Curve) around 50
/// units, clamped to at least one unit. The coefficient of variation, stock on
/// hand and catalog prices are drawn uniformly.
///
/// # Arguments
/// * `stores` - Number of stores (`T01`, `T02`, ...).
/// * `products` - Number of products carried by every store (`P001`, ...).
/// * `seed` - Fixes the grid; `None` draws a fresh one.
pub fn generate_demo_rows(stores: usize, products: usize, seed: Option<u64>) -> Vec<PlanningRow> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // Constant parameters, known valid.
    let weekly_demand = Normal::new(50.0_f64, 20.0).unwrap();

    // Economics belong to the product, not the pair.
    let catalog: Vec<UnitEconomics> = (0..products)
        .map(|_| {
            let unit_cost = rng.gen_range(5.0..50.0);
            UnitEconomics {
                unit_cost,
                sale_price: unit_cost * rng.gen_range(1.1..2.0),
                weekly_storage_cost: unit_cost * rng.gen_range(0.01..0.05),
            }
        })
        .collect();

    let mut rows = Vec::with_capacity(stores * products);
    for store in 1..=stores {
        for (index, economics) in catalog.iter().enumerate() {
            let mu: f64 = weekly_demand.sample(&mut rng).max(1.0);
            let cv: f64 = rng.gen_range(0.1..0.5);
            let forecast = !rng.gen_bool(UNFORECAST_SHARE);

            rows.push(PlanningRow {
                store_id: format!("T{:02}", store),
                product_id: format!("P{:03}", index + 1),
                mu_week: forecast.then_some(mu),
                sigma_week: forecast.then_some(mu * cv),
                stock_on_hand: rng.gen_range(0.0..2.0 * mu).round(),
                costs: CostSource::Catalog(*economics),
            });
        }
    }
    rows
}
