//! JSON export for results
//!
//! The document holds the full bundle plus a [`SampleStats`] summary of each
//! per-entity series.

use crate::error::MetricsError;
use crate::export::ResultsExporter;
use crate::stats::SampleStats;
use qsim_core::ResultBundle;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON exporter for simulation results
#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }
}

/// Summaries of the three per-entity series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub queue_wait: SampleStats,
    pub service_time: SampleStats,
    pub system_time: SampleStats,
}

impl SeriesSummary {
    pub fn from_results(results: &ResultBundle) -> Result<Self, MetricsError> {
        Ok(Self {
            queue_wait: SampleStats::from_samples(&results.queue_waits)?,
            service_time: SampleStats::from_samples(&results.service_times)?,
            system_time: SampleStats::from_samples(&results.system_times)?,
        })
    }
}

/// Top-level JSON document
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub statistics: SeriesSummary,
    pub results: ResultBundle,
}

impl ResultsExporter for JsonExporter {
    fn export(&self, results: &ResultBundle) -> Result<(), MetricsError> {
        let data = ExportData {
            statistics: SeriesSummary::from_results(results)?,
            results: results.clone(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };

        let mut writer = BufWriter::new(File::create(&self.path)?);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        debug!(path = %self.path.display(), bytes = json.len(), "Exported results as JSON");
        Ok(())
    }
}
