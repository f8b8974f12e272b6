// src/simulation/engine.rs

use crate::model::{CostRegime, DegenerateCostWarning, Evaluation, PlanningRow};
use crate::simulation::monte_carlo::MonteCarloEstimator;
use crate::strategy::newsvendor::NewsvendorOptimizer;
use crate::strategy::traits::ReplenishmentPolicy;
use serde::Serialize;
use std::thread;
use tracing::{debug, info, warn};

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanLine {
    pub store_id: String,
    pub product_id: String,
    pub stock_on_hand: f64,
    pub target_quantity: f64,
    pub suggested_order: f64,
    pub mu_week: f64,
    pub sigma_week: f64,
    pub unit_shortage_cost: f64,
    pub unit_overstock_cost: f64,
    pub critical_fractile: f64,
    pub approx_service_level: f64,
    pub expected_shortage_cost: f64,
    pub expected_overstock_cost: f64,
    pub expected_total_cost: f64,
    pub cost_regime: CostRegime,
    /// Filled only when a Monte Carlo audit is attached to the planner.
    pub simulated_expected_cost: Option<f64>,
}

/// A degenerate-cost row, identified.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedRow {
    pub store_id: String,
    pub product_id: String,
    pub warning: DegenerateCostWarning,
}

/// Output of one planning run, ordered by store then product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplenishmentPlan {
    pub lines: Vec<PlanLine>,
    pub warnings: Vec<FlaggedRow>,
}

impl ReplenishmentPlan {
    /// Units to order across every SKU-store.
    pub fn total_units(&self) -> f64 {
        self.lines.iter().map(|line| line.suggested_order).sum()
    }

    /// Expected shortage plus overstock cost across every SKU-store.
    pub fn total_expected_cost(&self) -> f64 {
        self.lines.iter().map(|line| line.expected_total_cost).sum()
    }

    /// Number of lines in each cost regime.
    pub fn regime_breakdown(&self) -> Vec<(CostRegime, usize)> {
        [
            CostRegime::Balanced,
            CostRegime::ShortageOnly,
            CostRegime::OverstockOnly,
            CostRegime::Degenerate,
        ]
        .into_iter()
        .map(|regime| {
            let count = self
                .lines
                .iter()
                .filter(|line| line.cost_regime == regime)
                .count();
            (regime, count)
        })
        .collect()
    }
}

/// Runs a replenishment policy over every joined SKU-store row.
///
/// Rows are independent: no row reads another's output, and a degenerate
/// row only adds a warning to the plan.
#[derive(Debug, Clone)]
pub struct ReplenishmentPlanner<P: ReplenishmentPolicy = NewsvendorOptimizer> {
    policy: P,
    audit: Option<MonteCarloEstimator>,
}

impl<P: ReplenishmentPolicy> ReplenishmentPlanner<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            audit: None,
        }
    }

    /// Attaches a simulated-cost audit column to every line.
    pub fn with_audit(mut self, audit: MonteCarloEstimator) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Plans every row on the calling thread.
    pub fn plan(&self, rows: &[PlanningRow]) -> ReplenishmentPlan {
        info!("Optimizing order policy for {} SKU-stores", rows.len());
        let evaluated = rows.iter().map(|row| self.plan_row(row)).collect();
        self.assemble(evaluated)
    }

    /// Plans rows across up to `workers` scoped threads.
    ///
    /// Gives the same plan as [`plan`](Self::plan); only throughput changes.
    pub fn plan_parallel(&self, rows: &[PlanningRow], workers: usize) -> ReplenishmentPlan {
        let workers = workers.max(1);
        if workers == 1 || rows.len() < 2 {
            return self.plan(rows);
        }
        info!(
            "Optimizing order policy for {} SKU-stores on {} workers",
            rows.len(),
            workers
        );

        let chunk_size = rows.len().div_ceil(workers);
        let evaluated = thread::scope(|scope| {
            let handles: Vec<_> = rows
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|row| self.plan_row(row))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            // Row evaluation cannot fail; a panicking worker is a bug worth surfacing.
            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(lines) => lines,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });
        self.assemble(evaluated)
    }

    fn plan_row(&self, row: &PlanningRow) -> (PlanLine, Option<DegenerateCostWarning>) {
        let Evaluation {
            input,
            result,
            regime,
            warning,
        } = self.policy.evaluate(&row.to_input());

        let simulated_expected_cost = self
            .audit
            .as_ref()
            .map(|audit| audit.estimate(&input, result.target_quantity).total());

        debug!(
            store_id = %row.store_id,
            product_id = %row.product_id,
            target = result.target_quantity,
            order = result.suggested_order,
            fractile = result.critical_fractile,
            "planned row"
        );

        let line = PlanLine {
            store_id: row.store_id.clone(),
            product_id: row.product_id.clone(),
            stock_on_hand: input.stock_on_hand,
            target_quantity: result.target_quantity,
            suggested_order: result.suggested_order,
            mu_week: input.mu_week,
            sigma_week: input.sigma_week,
            unit_shortage_cost: input.unit_shortage_cost,
            unit_overstock_cost: input.unit_overstock_cost,
            critical_fractile: result.critical_fractile,
            approx_service_level: result.approx_service_level,
            expected_shortage_cost: result.expected_shortage_cost,
            expected_overstock_cost: result.expected_overstock_cost,
            expected_total_cost: result.expected_total_cost(),
            cost_regime: regime,
            simulated_expected_cost,
        };
        (line, warning)
    }

    fn assemble(
        &self,
        evaluated: Vec<(PlanLine, Option<DegenerateCostWarning>)>,
    ) -> ReplenishmentPlan {
        let mut plan = ReplenishmentPlan::default();
        for (line, warning) in evaluated {
            if let Some(warning) = warning {
                warn!(
                    store_id = %line.store_id,
                    product_id = %line.product_id,
                    "{}", warning
                );
                plan.warnings.push(FlaggedRow {
                    store_id: line.store_id.clone(),
                    product_id: line.product_id.clone(),
                    warning,
                });
            }
            plan.lines.push(line);
        }

        plan.lines
            .sort_by(|a, b| (&a.store_id, &a.product_id).cmp(&(&b.store_id, &b.product_id)));
        plan.warnings
            .sort_by(|a, b| (&a.store_id, &a.product_id).cmp(&(&b.store_id, &b.product_id)));
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CostSource, OptimizationInput, OptimizationResult};
    use crate::simulation::config::MonteCarloConfig;
    use approx::assert_relative_eq;

    fn row(store: &str, product: &str, mu: f64, stock: f64, cu: f64, co: f64) -> PlanningRow {
        PlanningRow {
            store_id: store.to_string(),
            product_id: product.to_string(),
            mu_week: Some(mu),
            sigma_week: Some(mu * 0.2),
            stock_on_hand: stock,
            costs: CostSource::Explicit {
                shortage: cu,
                overstock: co,
            },
        }
    }

    fn sample_rows() -> Vec<PlanningRow> {
        vec![
            row("T02", "P001", 80.0, 10.0, 12.0, 4.0),
            row("T01", "P002", 100.0, 30.0, 1500.0, 50.0),
            row("T01", "P001", 40.0, 0.0, 0.0, 0.0),
            row("T03", "P004", 15.0, 50.0, 3.0, 9.0),
            row("T02", "P003", 60.0, 5.0, 25.0, 0.0),
        ]
    }

    #[test]
    fn lines_are_sorted_by_store_then_product() {
        let plan = ReplenishmentPlanner::new(NewsvendorOptimizer::default()).plan(&sample_rows());
        let keys: Vec<_> = plan
            .lines
            .iter()
            .map(|l| (l.store_id.as_str(), l.product_id.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("T01", "P001"),
                ("T01", "P002"),
                ("T02", "P001"),
                ("T02", "P003"),
                ("T03", "P004"),
            ]
        );
    }

    #[test]
    fn degenerate_row_warns_without_stopping_the_batch() {
        let plan = ReplenishmentPlanner::new(NewsvendorOptimizer::default()).plan(&sample_rows());
        assert_eq!(plan.lines.len(), 5);
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.warnings[0].store_id, "T01");
        assert_eq!(plan.warnings[0].product_id, "P001");

        let degenerate = &plan.lines[0];
        assert_eq!(degenerate.cost_regime, CostRegime::Degenerate);
        assert_eq!(degenerate.target_quantity, 40.0);
    }

    #[test]
    fn line_matches_direct_optimizer_call() {
        let optimizer = NewsvendorOptimizer::default();
        let plan = ReplenishmentPlanner::new(optimizer).plan(&sample_rows());
        let line = &plan.lines[1];
        let direct = optimizer.compute_order_quantity(100.0, 20.0, 30.0, 1500.0, 50.0);

        assert_eq!(line.target_quantity, direct.target_quantity);
        assert_eq!(line.suggested_order, direct.suggested_order);
        assert_eq!(line.critical_fractile, direct.critical_fractile);
        assert_eq!(line.expected_total_cost, direct.expected_total_cost());
        assert_eq!(line.simulated_expected_cost, None);
    }

    #[test]
    fn totals_sum_lines() {
        let plan = ReplenishmentPlanner::new(NewsvendorOptimizer::default()).plan(&sample_rows());
        let units: f64 = plan.lines.iter().map(|l| l.suggested_order).sum();
        assert_relative_eq!(plan.total_units(), units);
        assert!(plan.total_expected_cost() > 0.0);

        let breakdown = plan.regime_breakdown();
        assert_eq!(breakdown.iter().map(|(_, n)| n).sum::<usize>(), 5);
        assert!(breakdown.contains(&(CostRegime::ShortageOnly, 1)));
    }

    #[test]
    fn parallel_plan_equals_sequential() {
        let rows: Vec<_> = (0..97)
            .map(|i| {
                row(
                    &format!("T{:02}", i % 7),
                    &format!("P{:03}", i),
                    10.0 + i as f64,
                    (i % 13) as f64,
                    (i % 5) as f64,
                    (i % 3) as f64,
                )
            })
            .collect();
        let planner = ReplenishmentPlanner::new(NewsvendorOptimizer::default());
        let sequential = planner.plan(&rows);
        for workers in [0, 1, 2, 4, 16, 200] {
            assert_eq!(planner.plan_parallel(&rows, workers), sequential);
        }
    }

    #[test]
    fn audit_fills_simulated_cost() {
        let audit = MonteCarloEstimator::new(MonteCarloConfig::new(20_000, Some(7)).unwrap());
        let plan = ReplenishmentPlanner::new(NewsvendorOptimizer::default())
            .with_audit(audit)
            .plan(&sample_rows());

        let balanced = &plan.lines[1];
        let simulated = balanced.simulated_expected_cost.unwrap();
        assert_relative_eq!(simulated, balanced.expected_total_cost, max_relative = 0.1);

        let degenerate = &plan.lines[0];
        assert_eq!(degenerate.simulated_expected_cost, Some(0.0));
    }

    /// Flags every row so batch isolation can be checked independently of costs.
    #[derive(Debug)]
    struct AlwaysDegenerate;

    impl ReplenishmentPolicy for AlwaysDegenerate {
        fn evaluate(&self, input: &OptimizationInput) -> Evaluation {
            Evaluation {
                input: *input,
                result: OptimizationResult {
                    target_quantity: input.mu_week,
                    suggested_order: (input.mu_week - input.stock_on_hand).max(0.0),
                    critical_fractile: 0.5,
                    expected_shortage_cost: 0.0,
                    expected_overstock_cost: 0.0,
                    approx_service_level: 0.5,
                },
                regime: CostRegime::Degenerate,
                warning: Some(DegenerateCostWarning {
                    fallback_quantity: input.mu_week,
                }),
            }
        }
    }

    #[test]
    fn every_row_completes_when_every_row_warns() {
        let plan = ReplenishmentPlanner::new(AlwaysDegenerate).plan_parallel(&sample_rows(), 3);
        assert_eq!(plan.lines.len(), 5);
        assert_eq!(plan.warnings.len(), 5);
        assert_relative_eq!(plan.total_units(), 70.0 + 70.0 + 40.0 + 55.0);
    }
}
