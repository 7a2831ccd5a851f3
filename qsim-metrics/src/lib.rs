//! Analysis of simulation results
//!
//! This crate turns a [`qsim_core::ResultBundle`] into numbers worth looking
//! at: summary statistics, a side-by-side comparison with the closed-form
//! results, utilization sweeps, and files for external plotting tools.

pub mod comparison;
pub mod error;
pub mod export;
pub mod recorder;
pub mod stats;
pub mod sweep;

pub use comparison::{Comparison, MetricComparison};
pub use error::MetricsError;
pub use export::{export_csv, export_json, ResultsExporter};
pub use recorder::{publish_gauges, with_run_metrics_recorder, RunMetrics};
pub use stats::SampleStats;
pub use sweep::{default_rhos, sweep_utilization, SweepPoint};
