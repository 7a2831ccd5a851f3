//! Error types for analysis and export

use qsim_core::SimError;
use thiserror::Error;

/// Errors raised while analysing or exporting results
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("Histogram error: {0}")]
    Histogram(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
