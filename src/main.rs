use anyhow::{bail, Result};
use clap::Parser;
use replenishment_planner::io::{demand, forecast, reporting};
use replenishment_planner::simulation::{
    MonteCarloConfig, MonteCarloEstimator, OptimizerConfig, ReplenishmentPlanner,
};
use replenishment_planner::strategy::NewsvendorOptimizer;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Weekly Newsvendor replenishment plan per SKU-store
#[derive(Parser, Debug)]
#[command(name = "replenishment-planner")]
#[command(about = "Compute order-up-to levels and suggested orders from demand forecasts")]
struct Args {
    /// CSV of joined forecast, stock and cost rows
    #[arg(long, required_unless_present = "demo", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Plan a synthetic store x product grid instead of reading a file
    #[arg(long)]
    demo: bool,

    /// Stores in the synthetic grid
    #[arg(long, default_value = "5")]
    demo_stores: usize,

    /// Products in the synthetic grid
    #[arg(long, default_value = "20")]
    demo_products: usize,

    /// Output CSV path
    #[arg(long, default_value = "replenishment_plan.csv")]
    output: PathBuf,

    /// Lower clip for the balanced-cost z-score
    #[arg(long, default_value = "-3.0", allow_hyphen_values = true)]
    z_low: f64,

    /// Upper clip for the balanced-cost z-score
    #[arg(long, default_value = "3.0", allow_hyphen_values = true)]
    z_high: f64,

    /// Floor for the weekly demand standard deviation
    #[arg(long, default_value = "0.1")]
    sigma_min: f64,

    /// Worker threads used to evaluate rows
    #[arg(long, default_value = "1")]
    workers: usize,

    /// Add a Monte Carlo expected-cost audit column with this many draws per row
    #[arg(long)]
    audit_samples: Option<usize>,

    /// Random seed for the demo grid and the audit
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let optimizer = NewsvendorOptimizer::new(OptimizerConfig::new(
        (args.z_low, args.z_high),
        args.sigma_min,
    )?);

    let rows = match (&args.input, args.demo) {
        (Some(path), false) => forecast::read_planning_rows(path)?,
        (None, true) => {
            info!(
                "Generating demo grid of {} stores x {} products",
                args.demo_stores, args.demo_products
            );
            demand::generate_demo_rows(args.demo_stores, args.demo_products, args.seed)
        }
        _ => bail!("pass exactly one of --input or --demo"),
    };

    let mut planner = ReplenishmentPlanner::new(optimizer);
    if let Some(samples) = args.audit_samples {
        let audit = MonteCarloEstimator::new(MonteCarloConfig::new(samples, args.seed)?);
        planner = planner.with_audit(audit);
    }

    let plan = planner.plan_parallel(&rows, args.workers);

    reporting::write_plan(&args.output, &plan)?;
    reporting::log_summary(&plan);

    Ok(())
}
