//! Error types for the simulation engine

use thiserror::Error;

/// Top-level error type for simulation operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Event error: {0}")]
    Event(#[from] EventError),
}

/// Errors related to event scheduling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EventError {
    #[error("Event scheduling failed: cannot schedule event in the past ({time} < {now})")]
    ScheduleInPast { time: f64, now: f64 },

    #[error("Event scheduling failed: delay must be finite and non-negative, got {delay}")]
    InvalidDelay { delay: f64 },

    #[error("Event scheduling failed: {now} + {delay} is not a finite time")]
    TimeOverflow { now: f64, delay: f64 },
}

impl SimError {
    /// Shorthand for a rejected parameter.
    pub(crate) fn invalid_parameter(name: &str, value: f64, requirement: &str) -> Self {
        SimError::Configuration(format!("{name} must be {requirement}, got {value}"))
    }
}

/// Reject anything that is not a finite, strictly positive rate with a finite
/// mean `1 / rate`.
pub(crate) fn require_positive_rate(name: &str, value: f64) -> Result<f64, SimError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(SimError::invalid_parameter(name, value, "finite and > 0"));
    }
    if !(1.0 / value).is_finite() {
        return Err(SimError::invalid_parameter(
            name,
            value,
            "large enough for a finite mean 1/rate",
        ));
    }
    Ok(value)
}
