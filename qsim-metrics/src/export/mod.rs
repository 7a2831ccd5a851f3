//! Export of simulation results
//!
//! Writes a [`ResultBundle`] to disk so the series can be plotted or analysed
//! with external tools.

pub mod csv;
pub mod json;

use crate::error::MetricsError;
use qsim_core::ResultBundle;
use std::path::Path;

/// Trait for exporting results to different formats
pub trait ResultsExporter {
    /// Export results to the configured destination
    fn export(&self, results: &ResultBundle) -> Result<(), MetricsError>;
}

/// Export results to JSON format
///
/// # Example
/// ```no_run
/// use qsim_core::{run_with_config, SimulationConfig};
/// use qsim_metrics::export::export_json;
///
/// let results = run_with_config(&SimulationConfig::mm1(0.5, 1.0, 1_000.0)).unwrap();
/// export_json(&results, "results/mm1.json", true).unwrap();
/// ```
pub fn export_json(
    results: &ResultBundle,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), MetricsError> {
    let exporter = json::JsonExporter::new(path.as_ref(), pretty);
    exporter.export(results)
}

/// Export results to CSV format
///
/// Writes `{stem}_running_mean.csv` and `{stem}_samples.csv` next to `path`.
///
/// # Example
/// ```no_run
/// use qsim_core::{run_with_config, SimulationConfig};
/// use qsim_metrics::export::export_csv;
///
/// let results = run_with_config(&SimulationConfig::md1(0.5, 1.0, 1_000.0)).unwrap();
/// export_csv(&results, "results/md1.csv").unwrap();
/// ```
pub fn export_csv(results: &ResultBundle, path: impl AsRef<Path>) -> Result<(), MetricsError> {
    let exporter = csv::CsvExporter::new(path.as_ref());
    exporter.export(results)
}
