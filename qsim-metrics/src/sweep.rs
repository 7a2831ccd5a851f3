//! Utilization sweeps
//!
//! A sweep runs one simulation per utilization level, keeping the service rate
//! fixed and setting `lambda = rho * mu`. The resulting series traces simulated
//! Wq against the closed-form curve.

use crate::error::MetricsError;
use qsim_core::ids::derive_seed;
use qsim_core::{run_with_config, theoretical_wq, QueueModel, SimulationConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Seed domain separating sweep points from one another.
const SEED_DOMAIN_SWEEP: u64 = 0x5357_4545_5000_0000; // "SWEEP" (tag)

/// One utilization level of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub rho: f64,
    pub arrival_rate: f64,
    pub simulated_wq: f64,
    pub theoretical_wq: f64,
    pub departures: u64,
}

/// Utilization levels 0.05, 0.10, ..., 0.95.
pub fn default_rhos() -> Vec<f64> {
    (1..=19).map(|i| f64::from(i) * 0.05).collect()
}

/// Run one simulation per entry of `rhos`.
///
/// With `seed` set, point `i` is seeded from `(seed, i)` so the whole sweep is
/// reproducible. Levels at or above 1 are simulated; their theoretical value is
/// `f64::INFINITY`.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidSweep`] if `rhos` is empty or holds a value
/// that is not finite and positive, and [`MetricsError::Simulation`] if the
/// service rate or horizon is rejected.
pub fn sweep_utilization(
    model: QueueModel,
    service_rate: f64,
    horizon: f64,
    rhos: &[f64],
    seed: Option<u64>,
) -> Result<Vec<SweepPoint>, MetricsError> {
    if rhos.is_empty() {
        return Err(MetricsError::InvalidSweep("no utilization levels given".to_string()));
    }
    if let Some(rho) = rhos.iter().find(|rho| !(rho.is_finite() && **rho > 0.0)) {
        return Err(MetricsError::InvalidSweep(format!(
            "utilization must be finite and > 0, got {rho}"
        )));
    }

    info!(%model, service_rate, horizon, points = rhos.len(), "Starting utilization sweep");

    let mut points = Vec::with_capacity(rhos.len());
    for (index, &rho) in rhos.iter().enumerate() {
        let arrival_rate = rho * service_rate;
        let mut config = SimulationConfig::new(arrival_rate, service_rate, horizon, model.into());
        if let Some(seed) = seed {
            config = config.with_seed(derive_seed(seed, SEED_DOMAIN_SWEEP ^ index as u64));
        }

        let results = run_with_config(&config)?;
        let point = SweepPoint {
            rho,
            arrival_rate,
            simulated_wq: results.mean_queue_wait(),
            theoretical_wq: theoretical_wq(model, arrival_rate, service_rate),
            departures: results.summary.departures,
        };
        debug!(
            rho,
            simulated_wq = point.simulated_wq,
            theoretical_wq = point.theoretical_wq,
            "Sweep point finished"
        );
        points.push(point);
    }

    Ok(points)
}
