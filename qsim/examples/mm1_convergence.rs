//! Simulated versus theoretical waiting times for M/M/1 and M/D/1 queues.
//!
//! ```bash
//! cargo run -p qsim --example mm1_convergence
//! RUST_LOG=qsim_metrics=debug cargo run -p qsim --example mm1_convergence
//! ```

use qsim::core::init_simulation_logging;
use qsim::metrics::{default_rhos, publish_gauges, SampleStats};
use qsim::prelude::*;
use tracing::info;

const ARRIVAL_RATE: f64 = 0.5;
const SERVICE_RATE: f64 = 1.0;
const HORIZON: f64 = 10_000.0;
const SEED: u64 = 42;

fn main() -> Result<(), MetricsError> {
    init_simulation_logging();

    for policy in [ServicePolicy::Stochastic, ServicePolicy::Deterministic] {
        let config =
            SimulationConfig::new(ARRIVAL_RATE, SERVICE_RATE, HORIZON, policy).with_seed(SEED);
        let results = run_with_config(&config)?;
        let comparison = Comparison::new(config.model(), ARRIVAL_RATE, SERVICE_RATE, &results);
        publish_gauges(&comparison);

        println!("{comparison}");
        println!("  Wq samples: {}", SampleStats::from_samples(&results.queue_waits)?);
        if let Some(last) = results.running_mean.last() {
            println!("  running mean at {}: {:.4}", last.time, last.value);
        }
        println!();
    }

    for model in [QueueModel::MM1, QueueModel::MD1] {
        info!(%model, "Sweeping utilization");
        println!("{model} sweep (mu = {SERVICE_RATE}, horizon = {HORIZON})");
        println!("{:>6} {:>12} {:>12}", "rho", "simulated", "theoretical");
        for point in sweep_utilization(model, SERVICE_RATE, HORIZON, &default_rhos(), Some(SEED))? {
            println!(
                "{:>6.2} {:>12.4} {:>12.4}",
                point.rho, point.simulated_wq, point.theoretical_wq
            );
        }
        println!();
    }

    Ok(())
}
