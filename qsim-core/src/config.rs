//! Run configuration

use crate::error::{require_positive_rate, SimError};
use crate::server::ServicePolicy;
use crate::theory::{self, QueueModel};
use serde::{Deserialize, Serialize};

/// Parameters of a single simulation run.
///
/// Defaults: `lambda = 0.5`, `mu = 1.0`, horizon `10_000`, exponential
/// service, unseeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Arrival rate `lambda`
    pub arrival_rate: f64,
    /// Service rate `mu`
    pub service_rate: f64,
    /// Simulated end time
    pub horizon: f64,
    pub service_policy: ServicePolicy,
    /// Master seed for the arrival and service streams; `None` draws entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 0.5,
            service_rate: 1.0,
            horizon: 10_000.0,
            service_policy: ServicePolicy::Stochastic,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        horizon: f64,
        service_policy: ServicePolicy,
    ) -> Self {
        Self {
            arrival_rate,
            service_rate,
            horizon,
            service_policy,
            seed: None,
        }
    }

    /// M/M/1 configuration
    pub fn mm1(arrival_rate: f64, service_rate: f64, horizon: f64) -> Self {
        Self::new(arrival_rate, service_rate, horizon, ServicePolicy::Stochastic)
    }

    /// M/D/1 configuration
    pub fn md1(arrival_rate: f64, service_rate: f64, horizon: f64) -> Self {
        Self::new(arrival_rate, service_rate, horizon, ServicePolicy::Deterministic)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check rates and horizon
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if either rate is not finite and
    /// positive, or the horizon is negative or non-finite. A zero horizon is
    /// accepted and produces an empty run.
    pub fn validate(&self) -> Result<(), SimError> {
        require_positive_rate("arrival rate", self.arrival_rate)?;
        require_positive_rate("service rate", self.service_rate)?;
        validate_horizon(self.horizon)?;
        Ok(())
    }

    pub fn model(&self) -> QueueModel {
        self.service_policy.into()
    }

    /// `rho = lambda / mu`
    pub fn utilization(&self) -> f64 {
        theory::utilization(self.arrival_rate, self.service_rate)
    }

    pub fn is_stable(&self) -> bool {
        theory::is_stable(self.arrival_rate, self.service_rate)
    }
}

pub(crate) fn validate_horizon(horizon: f64) -> Result<f64, SimError> {
    if horizon.is_finite() && horizon >= 0.0 {
        Ok(horizon)
    } else {
        Err(SimError::invalid_parameter("horizon", horizon, "finite and >= 0"))
    }
}
