//! CSV export for results
//!
//! Creates two files next to the configured path:
//! - `{stem}_running_mean.csv`: `departure,time,running_mean_wq`
//! - `{stem}_samples.csv`: `service,queue_wait,service_time,system_time`, one
//!   row per service started, in start order. An entity still in service when
//!   the run stopped has empty `queue_wait` and `system_time` columns.

use crate::error::MetricsError;
use crate::export::ResultsExporter;
use qsim_core::ResultBundle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV exporter for simulation results
#[derive(Debug)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Create a new CSV exporter
    ///
    /// # Arguments
    /// * `path` - Base output path, files are written with suffixes
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Path of the file holding one kind of series
    pub fn path_for(&self, suffix: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("results");
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        parent.join(format!("{stem}_{suffix}.csv"))
    }

    fn export_running_mean(&self, results: &ResultBundle) -> Result<(), MetricsError> {
        let path = self.path_for("running_mean");
        let mut writer = BufWriter::new(File::create(&path)?);

        writeln!(writer, "departure,time,running_mean_wq")?;
        for (index, point) in results.running_mean.iter().enumerate() {
            writeln!(writer, "{},{},{}", index + 1, point.time.as_f64(), point.value)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = results.running_mean.len(), "Exported running mean");
        Ok(())
    }

    fn export_samples(&self, results: &ResultBundle) -> Result<(), MetricsError> {
        let path = self.path_for("samples");
        let mut writer = BufWriter::new(File::create(&path)?);

        writeln!(writer, "service,queue_wait,service_time,system_time")?;
        for (index, service) in results.service_times.iter().enumerate() {
            let wait = results.queue_waits.get(index);
            let system = results.system_times.get(index);
            writeln!(
                writer,
                "{},{},{service},{}",
                index + 1,
                optional(wait),
                optional(system)
            )?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = results.service_times.len(), "Exported samples");
        Ok(())
    }
}

fn optional(value: Option<&f64>) -> String {
    value.map(f64::to_string).unwrap_or_default()
}

impl ResultsExporter for CsvExporter {
    fn export(&self, results: &ResultBundle) -> Result<(), MetricsError> {
        self.export_running_mean(results)?;
        self.export_samples(results)
    }
}
