//! Closed-form steady-state results for single-server queues.
//!
//! All functions are pure. Unstable systems (`lambda >= mu`) yield
//! `f64::INFINITY` rather than a finite number.

use crate::server::ServicePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Queueing model with Poisson arrivals and one server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueModel {
    /// Exponential service
    MM1,
    /// Deterministic service
    MD1,
}

impl From<ServicePolicy> for QueueModel {
    fn from(policy: ServicePolicy) -> Self {
        match policy {
            ServicePolicy::Stochastic => QueueModel::MM1,
            ServicePolicy::Deterministic => QueueModel::MD1,
        }
    }
}

impl From<QueueModel> for ServicePolicy {
    fn from(model: QueueModel) -> Self {
        match model {
            QueueModel::MM1 => ServicePolicy::Stochastic,
            QueueModel::MD1 => ServicePolicy::Deterministic,
        }
    }
}

impl fmt::Display for QueueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueModel::MM1 => f.write_str("M/M/1"),
            QueueModel::MD1 => f.write_str("M/D/1"),
        }
    }
}

/// Utilization `rho = lambda / mu`.
pub fn utilization(lambda: f64, mu: f64) -> f64 {
    lambda / mu
}

/// True when the queue has a steady state.
pub fn is_stable(lambda: f64, mu: f64) -> bool {
    lambda < mu
}

/// Mean waiting time in queue, `Wq`.
///
/// - M/M/1: `1/(mu - lambda) - 1/mu`
/// - M/D/1: `rho / (2 mu (1 - rho))`
///
/// ```
/// use qsim_core::{theoretical_wq, QueueModel};
///
/// assert_eq!(theoretical_wq(QueueModel::MM1, 0.5, 1.0), 1.0);
/// assert!(theoretical_wq(QueueModel::MD1, 1.0, 1.0).is_infinite());
/// ```
pub fn theoretical_wq(model: QueueModel, lambda: f64, mu: f64) -> f64 {
    if !is_stable(lambda, mu) {
        return f64::INFINITY;
    }
    match model {
        QueueModel::MM1 => 1.0 / (mu - lambda) - 1.0 / mu,
        QueueModel::MD1 => {
            let rho = utilization(lambda, mu);
            rho / (2.0 * mu * (1.0 - rho))
        }
    }
}

/// Mean service time, `S = 1/mu`, for both models.
pub fn theoretical_service_time(mu: f64) -> f64 {
    1.0 / mu
}

/// Mean time in system, `W = Wq + S`.
pub fn theoretical_system_time(model: QueueModel, lambda: f64, mu: f64) -> f64 {
    theoretical_wq(model, lambda, mu) + theoretical_service_time(mu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm1_wq() {
        assert_eq!(theoretical_wq(QueueModel::MM1, 0.5, 1.0), 1.0);
        let wq = theoretical_wq(QueueModel::MM1, 0.8, 1.0);
        assert!((wq - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_md1_wq() {
        let wq = theoretical_wq(QueueModel::MD1, 0.9, 1.0);
        assert!((wq - 4.5).abs() < 1e-9, "got {wq}");
        assert_eq!(theoretical_wq(QueueModel::MD1, 0.5, 1.0), 0.5);
    }

    #[test]
    fn test_instability_sentinel() {
        for model in [QueueModel::MM1, QueueModel::MD1] {
            assert_eq!(theoretical_wq(model, 1.0, 1.0), f64::INFINITY);
            assert_eq!(theoretical_wq(model, 1.5, 1.0), f64::INFINITY);
            assert_eq!(theoretical_system_time(model, 2.0, 1.0), f64::INFINITY);
            assert!(theoretical_wq(model, 0.999, 1.0).is_finite());
        }
    }

    #[test]
    fn test_formulas_are_pure() {
        let a = theoretical_wq(QueueModel::MD1, 0.3, 0.7);
        let b = theoretical_wq(QueueModel::MD1, 0.3, 0.7);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_system_time() {
        // M/M/1: W = 1/(mu - lambda)
        let w = theoretical_system_time(QueueModel::MM1, 0.5, 1.0);
        assert!((w - 2.0).abs() < 1e-12);
        assert_eq!(theoretical_service_time(4.0), 0.25);
    }

    #[test]
    fn test_model_policy_mapping() {
        assert_eq!(QueueModel::from(ServicePolicy::Deterministic), QueueModel::MD1);
        assert_eq!(ServicePolicy::from(QueueModel::MM1), ServicePolicy::Stochastic);
        assert_eq!(QueueModel::MD1.to_string(), "M/D/1");
    }
}
