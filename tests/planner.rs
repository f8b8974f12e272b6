//! End-to-end planning: CSV rows in, plan CSV out.

use approx::assert_relative_eq;
use replenishment_planner::io::{demand, forecast, reporting};
use replenishment_planner::model::CostRegime;
use replenishment_planner::simulation::{
    MonteCarloConfig, MonteCarloEstimator, OptimizerConfig, ReplenishmentPlanner,
};
use replenishment_planner::strategy::NewsvendorOptimizer;
use replenishment_planner::PlannerError;

const FORECAST_CSV: &str = "\
store_id,product_id,mu_week,sigma_week,stock_on_hand,unit_shortage_cost,unit_overstock_cost,unit_cost,sale_price,weekly_storage_cost
T02,P001,100,20,30,1500,50,,,
T01,P002,100,20,0,1000,0,,,
T01,P001,100,20,0,0,0,,,
T01,P003,100,20,0,0,1000,,,
T02,P002,,,5,,,10,25,1
T03,P001,-40,-2,-7,8,2,,,
";

fn planner() -> ReplenishmentPlanner {
    ReplenishmentPlanner::new(NewsvendorOptimizer::default())
}

#[test]
fn plans_every_branch_from_csv() {
    let rows = forecast::read_planning_rows_from_reader(FORECAST_CSV.as_bytes()).unwrap();
    let plan = planner().plan(&rows);
    assert_eq!(plan.lines.len(), 6);

    let line = |store: &str, product: &str| {
        plan.lines
            .iter()
            .find(|l| l.store_id == store && l.product_id == product)
            .unwrap()
    };

    let degenerate = line("T01", "P001");
    assert_eq!(degenerate.cost_regime, CostRegime::Degenerate);
    assert_eq!(degenerate.target_quantity, 100.0);
    assert_eq!(degenerate.critical_fractile, 0.5);

    let aggressive = line("T01", "P002");
    assert_eq!(aggressive.cost_regime, CostRegime::ShortageOnly);
    assert_eq!(aggressive.critical_fractile, 0.99);
    assert!(aggressive.target_quantity > 100.0);

    let conservative = line("T01", "P003");
    assert_eq!(conservative.cost_regime, CostRegime::OverstockOnly);
    assert_eq!(conservative.critical_fractile, 0.01);
    assert!(conservative.target_quantity < 100.0);

    let balanced = line("T02", "P001");
    assert_relative_eq!(balanced.critical_fractile, 0.9677, epsilon = 1e-4);
    assert_relative_eq!(balanced.target_quantity, 137.0, epsilon = 0.1);
    assert_relative_eq!(balanced.suggested_order, 107.0, epsilon = 0.1);

    // No forecast: mean 0, sd 1, costs from the catalog.
    let unforecast = line("T02", "P002");
    assert_eq!(unforecast.mu_week, 0.0);
    assert_eq!(unforecast.sigma_week, 1.0);
    assert_eq!(unforecast.unit_shortage_cost, 15.0);
    assert_eq!(unforecast.unit_overstock_cost, 11.0);
    assert_eq!(unforecast.suggested_order, 0.0);

    // Negative raw inputs are clamped, not rejected.
    let noisy = line("T03", "P001");
    assert_eq!(noisy.mu_week, 0.0);
    assert_eq!(noisy.sigma_week, 0.1);
    assert_eq!(noisy.stock_on_hand, 0.0);
    assert!(noisy.target_quantity >= 0.0);

    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].product_id, "P001");
    assert_eq!(plan.warnings[0].store_id, "T01");
}

#[test]
fn plan_csv_lists_lines_in_store_order() {
    let rows = forecast::read_planning_rows_from_reader(FORECAST_CSV.as_bytes()).unwrap();
    let plan = planner().plan(&rows);

    let mut buffer = Vec::new();
    reporting::write_plan_to_writer(&mut buffer, &plan).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let keys: Vec<String> = text
        .lines()
        .skip(1)
        .map(|l| l.split(',').take(2).collect::<Vec<_>>().join("/"))
        .collect();
    assert_eq!(
        keys,
        vec!["T01/P001", "T01/P002", "T01/P003", "T02/P001", "T02/P002", "T03/P001"]
    );
}

#[test]
fn threaded_demo_plan_matches_sequential() {
    let rows = demand::generate_demo_rows(6, 25, Some(2024));
    let planner = planner();
    let sequential = planner.plan(&rows);
    let threaded = planner.plan_parallel(&rows, 4);
    assert_eq!(sequential, threaded);
    assert_eq!(sequential.lines.len(), 150);
}

#[test]
fn seeded_audit_is_reproducible() {
    let rows = demand::generate_demo_rows(2, 10, Some(5));
    let audit = MonteCarloEstimator::new(MonteCarloConfig::new(2_000, Some(99)).unwrap());
    let planner = planner().with_audit(audit);

    let first = planner.plan(&rows);
    let second = planner.plan_parallel(&rows, 3);
    assert_eq!(first, second);
    assert!(first.lines.iter().all(|l| l.simulated_expected_cost.is_some()));
}

#[test]
fn inverted_z_clip_is_invalid_configuration() {
    let err = OptimizerConfig::new((3.0, -3.0), 0.1).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidConfiguration { .. }));
    assert!(NewsvendorOptimizer::with_bounds((3.0, -3.0), 0.1).is_err());
}
