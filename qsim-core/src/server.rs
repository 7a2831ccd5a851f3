//! The single server: service-time policy and occupancy state.
//!
//! [`Server`] only samples durations. Whether it is occupied, and by whom, is
//! a [`ServerState`] value owned and transitioned by the simulation loop.

use crate::dists::{ConstantService, ExponentialService, ServiceTimeDistribution};
use crate::error::SimError;
use crate::randomness::RandomSource;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// How service durations are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicePolicy {
    /// Exponential with mean `1 / mu` (M/M/1).
    #[default]
    Stochastic,
    /// Exactly `1 / mu` every time (M/D/1).
    Deterministic,
}

/// Occupancy of the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerState {
    #[default]
    Idle,
    Busy(EntityId),
}

impl ServerState {
    pub fn is_busy(&self) -> bool {
        matches!(self, ServerState::Busy(_))
    }

    /// Entity currently in service, if any.
    pub fn in_service(&self) -> Option<EntityId> {
        match self {
            ServerState::Busy(id) => Some(*id),
            ServerState::Idle => None,
        }
    }
}

/// Service-time sampler for the single server.
pub struct Server {
    rate: f64,
    policy: Option<ServicePolicy>,
    distribution: Box<dyn ServiceTimeDistribution>,
}

impl Server {
    /// Build the server for `policy` at service rate `rate`.
    ///
    /// The random source is only consumed by [`ServicePolicy::Stochastic`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `rate` is not finite and positive.
    pub fn new(
        policy: ServicePolicy,
        rate: f64,
        source: impl RandomSource + 'static,
    ) -> Result<Self, SimError> {
        let distribution: Box<dyn ServiceTimeDistribution> = match policy {
            ServicePolicy::Stochastic => Box::new(ExponentialService::new(rate, source)?),
            ServicePolicy::Deterministic => Box::new(ConstantService::new(rate)?),
        };
        Ok(Self {
            rate,
            policy: Some(policy),
            distribution,
        })
    }

    /// Wrap a custom service-time distribution.
    pub fn from_distribution(distribution: impl ServiceTimeDistribution + 'static) -> Self {
        Self {
            rate: 1.0 / distribution.mean(),
            policy: None,
            distribution: Box::new(distribution),
        }
    }

    /// Sample one service duration.
    pub fn sample_duration(&mut self) -> f64 {
        self.distribution.sample_duration()
    }

    /// Service rate `mu`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// `None` when built from a custom distribution.
    pub fn policy(&self) -> Option<ServicePolicy> {
        self.policy
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("rate", &self.rate)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
