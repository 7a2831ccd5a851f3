//! Summary statistics over a sample series
//!
//! Count, mean, standard deviation and extremes are computed exactly.
//! Percentiles come from an HdrHistogram holding the samples at a resolution
//! of one millionth of a time unit.

use crate::error::MetricsError;
use hdrhistogram::Histogram as HdrHistogram;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Samples are stored in the histogram as `value * SCALE`.
const SCALE: f64 = 1_000_000.0;
const SIGNIFICANT_FIGURES: u8 = 3;

/// Summary of one sample series, all zero for an empty series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub count: u64,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 50th percentile (median)
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

impl SampleStats {
    /// Summarize `samples`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Histogram`] if a sample is negative or not
    /// finite.
    pub fn from_samples(samples: &[f64]) -> Result<Self, MetricsError> {
        if samples.is_empty() {
            return Ok(Self::default());
        }

        let mut histogram = HdrHistogram::<u64>::new(SIGNIFICANT_FIGURES)
            .map_err(|e| MetricsError::Histogram(format!("failed to create histogram: {e}")))?;
        for &sample in samples {
            if !(sample.is_finite() && sample >= 0.0) {
                return Err(MetricsError::Histogram(format!(
                    "sample must be finite and non-negative, got {sample}"
                )));
            }
            histogram
                .record((sample * SCALE).round() as u64)
                .map_err(|e| MetricsError::Histogram(format!("failed to record {sample}: {e}")))?;
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count;
        let quantile = |q: f64| histogram.value_at_quantile(q) as f64 / SCALE;

        Ok(Self {
            count: samples.len() as u64,
            mean,
            std_dev: variance.sqrt(),
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            p50: quantile(0.5),
            p95: quantile(0.95),
            p99: quantile(0.99),
        })
    }
}

impl fmt::Display for SampleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={}, mean={:.4}, std_dev={:.4}, min={:.4}, max={:.4}, ",
            self.count, self.mean, self.std_dev, self.min, self.max,
        )?;
        write!(f, "p50={:.4}, p95={:.4}, p99={:.4}", self.p50, self.p95, self.p99)
    }
}
