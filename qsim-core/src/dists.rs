//! Distribution traits and implementations for arrival patterns and service times
//!
//! Exponential variates are produced by inverse-CDF sampling on a uniform draw
//! from the component's own [`RandomSource`]: `-ln(1 - u) / rate`.

use crate::error::{require_positive_rate, SimError};
use crate::randomness::RandomSource;

/// Trait for generating arrival patterns
pub trait ArrivalPattern: Send {
    /// Time until the next arrival, always strictly positive.
    fn next_inter_arrival(&mut self) -> f64;
}

/// Trait for sampling service times from a distribution
pub trait ServiceTimeDistribution: Send {
    /// Duration of one service, always strictly positive.
    fn sample_duration(&mut self) -> f64;

    /// Expected service duration.
    fn mean(&self) -> f64;
}

/// Inverse-CDF exponential variate for a uniform `u` in `[0, 1)`.
///
/// `u == 0` maps to 0, so the result is floored at the smallest positive f64.
pub fn exponential_variate(u: f64, rate: f64) -> f64 {
    (-(1.0 - u).ln() / rate).max(f64::MIN_POSITIVE)
}

// =============================================================================
// Arrival Pattern Implementations
// =============================================================================

/// Poisson arrival pattern
///
/// Exponentially distributed inter-arrival times with mean `1 / rate`.
pub struct PoissonArrivals {
    rate: f64,
    source: Box<dyn RandomSource>,
}

impl PoissonArrivals {
    /// Create a new Poisson arrival pattern
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `rate` is not finite and positive.
    pub fn new(rate: f64, source: impl RandomSource + 'static) -> Result<Self, SimError> {
        Ok(Self {
            rate: require_positive_rate("arrival rate", rate)?,
            source: Box::new(source),
        })
    }

    /// Get the rate parameter
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl ArrivalPattern for PoissonArrivals {
    fn next_inter_arrival(&mut self) -> f64 {
        exponential_variate(self.source.next_uniform(), self.rate)
    }
}

impl std::fmt::Debug for PoissonArrivals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoissonArrivals")
            .field("rate", &self.rate)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Service Time Distribution Implementations
// =============================================================================

/// Exponential service time distribution (the M in M/M/1)
pub struct ExponentialService {
    rate: f64,
    source: Box<dyn RandomSource>,
}

impl ExponentialService {
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `rate` is not finite and positive.
    pub fn new(rate: f64, source: impl RandomSource + 'static) -> Result<Self, SimError> {
        Ok(Self {
            rate: require_positive_rate("service rate", rate)?,
            source: Box::new(source),
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl ServiceTimeDistribution for ExponentialService {
    fn sample_duration(&mut self) -> f64 {
        exponential_variate(self.source.next_uniform(), self.rate)
    }

    fn mean(&self) -> f64 {
        1.0 / self.rate
    }
}

/// Constant service time distribution (the D in M/D/1)
///
/// Always returns exactly `1 / rate`.
#[derive(Debug, Clone)]
pub struct ConstantService {
    duration: f64,
}

impl ConstantService {
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `rate` is not finite and positive.
    pub fn new(rate: f64) -> Result<Self, SimError> {
        Ok(Self {
            duration: 1.0 / require_positive_rate("service rate", rate)?,
        })
    }
}

impl ServiceTimeDistribution for ConstantService {
    fn sample_duration(&mut self) -> f64 {
        self.duration
    }

    fn mean(&self) -> f64 {
        self.duration
    }
}
