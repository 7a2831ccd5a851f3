//! Simulated versus closed-form timing metrics

use qsim_core::theory::{theoretical_service_time, theoretical_system_time, utilization};
use qsim_core::{theoretical_wq, QueueModel, ResultBundle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One simulated metric next to its closed-form value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub simulated: f64,
    /// `f64::INFINITY` for an unstable system
    pub theoretical: f64,
    pub absolute_difference: f64,
    /// `None` when the theoretical value is infinite or zero
    pub relative_error: Option<f64>,
}

impl MetricComparison {
    pub fn new(simulated: f64, theoretical: f64) -> Self {
        let absolute_difference = (simulated - theoretical).abs();
        let relative_error = (theoretical.is_finite() && theoretical != 0.0)
            .then(|| absolute_difference / theoretical.abs());
        Self {
            simulated,
            theoretical,
            absolute_difference,
            relative_error,
        }
    }

    /// Whether the relative error is known and at most `tolerance`.
    pub fn within(&self, tolerance: f64) -> bool {
        self.relative_error.is_some_and(|e| e <= tolerance)
    }
}

impl fmt::Display for MetricComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulated={:.4}, theoretical={:.4}", self.simulated, self.theoretical)?;
        match self.relative_error {
            Some(e) => write!(f, ", error={:.2}%", e * 100.0),
            None => write!(f, ", error=n/a"),
        }
    }
}

/// Simulated means of one run set against the closed-form results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub model: QueueModel,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub utilization: f64,
    pub departures: u64,
    /// Mean time in the waiting line (Wq)
    pub queue_wait: MetricComparison,
    /// Mean service time (S)
    pub service_time: MetricComparison,
    /// Mean time in the system (W = Wq + S)
    pub system_time: MetricComparison,
}

impl Comparison {
    pub fn new(
        model: QueueModel,
        arrival_rate: f64,
        service_rate: f64,
        results: &ResultBundle,
    ) -> Self {
        Self {
            model,
            arrival_rate,
            service_rate,
            utilization: utilization(arrival_rate, service_rate),
            departures: results.summary.departures,
            queue_wait: MetricComparison::new(
                results.mean_queue_wait(),
                theoretical_wq(model, arrival_rate, service_rate),
            ),
            service_time: MetricComparison::new(
                results.mean_service_time(),
                theoretical_service_time(service_rate),
            ),
            system_time: MetricComparison::new(
                results.mean_system_time(),
                theoretical_system_time(model, arrival_rate, service_rate),
            ),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} queue (lambda={}, mu={}, rho={:.3}, departures={})",
            self.model, self.arrival_rate, self.service_rate, self.utilization, self.departures
        )?;
        writeln!(f, "  Wq: {}", self.queue_wait)?;
        writeln!(f, "  S:  {}", self.service_time)?;
        write!(f, "  W:  {}", self.system_time)
    }
}
