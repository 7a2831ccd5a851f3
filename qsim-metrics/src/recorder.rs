//! `metrics` facade integration.
//!
//! The engine emits standard `metrics` counters and gauges
//! (`qsim_arrivals_total`, `qsim_departures_total`,
//! `qsim_waiting_line_length`). [`publish_gauges`] adds the outcome of a
//! [`Comparison`]. Any installed recorder picks these up; for tests and
//! one-off runs, [`with_run_metrics_recorder`] captures them locally into a
//! [`RunMetrics`] without touching global state:
//!
//! ```rust
//! # use std::sync::{Arc, Mutex};
//! # use qsim_metrics::recorder::{with_run_metrics_recorder, RunMetrics};
//! let captured = Arc::new(Mutex::new(RunMetrics::default()));
//! with_run_metrics_recorder(&captured, || {
//!     metrics::counter!("qsim_arrivals_total").increment(3);
//! });
//! assert_eq!(captured.lock().unwrap().counter("qsim_arrivals_total", &[]), Some(3));
//! ```

use crate::comparison::{Comparison, MetricComparison};
use metrics::{
    gauge, Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type MetricKey = (String, Vec<(String, String)>);

/// Counters and gauges captured during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    counters: BTreeMap<MetricKey, u64>,
    gauges: BTreeMap<MetricKey, f64>,
}

impl RunMetrics {
    /// Counter value for `name` with exactly these labels, in any order.
    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
        self.counters.get(&metric_key(name, labels)).copied()
    }

    /// Last value set on the gauge `name` with exactly these labels.
    pub fn gauge(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.gauges.get(&metric_key(name, labels)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty()
    }
}

fn metric_key(name: &str, labels: &[(&str, &str)]) -> MetricKey {
    let mut labels: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    labels.sort();
    (name.to_string(), labels)
}

fn owned_key(key: &Key) -> MetricKey {
    let mut labels: Vec<(String, String)> = key
        .labels()
        .map(|l| (l.key().to_string(), l.value().to_string()))
        .collect();
    labels.sort();
    (key.name().to_string(), labels)
}

fn lock(metrics: &Mutex<RunMetrics>) -> MutexGuard<'_, RunMetrics> {
    metrics.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A `metrics::Recorder` writing into a shared [`RunMetrics`]
///
/// Histograms are not captured.
#[derive(Clone)]
pub struct RunRecorder {
    metrics: Arc<Mutex<RunMetrics>>,
}

impl RunRecorder {
    pub fn new(metrics: Arc<Mutex<RunMetrics>>) -> Self {
        Self { metrics }
    }
}

/// Run `f` with a local recorder capturing into `metrics`.
pub fn with_run_metrics_recorder<T>(metrics: &Arc<Mutex<RunMetrics>>, f: impl FnOnce() -> T) -> T {
    let recorder = RunRecorder::new(metrics.clone());
    metrics::with_local_recorder(&recorder, f)
}

struct CounterHandle {
    metrics: Arc<Mutex<RunMetrics>>,
    key: MetricKey,
}

impl metrics::CounterFn for CounterHandle {
    fn increment(&self, value: u64) {
        let mut m = lock(&self.metrics);
        *m.counters.entry(self.key.clone()).or_default() += value;
    }

    fn absolute(&self, value: u64) {
        lock(&self.metrics).counters.insert(self.key.clone(), value);
    }
}

struct GaugeHandle {
    metrics: Arc<Mutex<RunMetrics>>,
    key: MetricKey,
}

impl metrics::GaugeFn for GaugeHandle {
    fn increment(&self, value: f64) {
        let mut m = lock(&self.metrics);
        *m.gauges.entry(self.key.clone()).or_default() += value;
    }

    fn decrement(&self, value: f64) {
        self.increment(-value);
    }

    fn set(&self, value: f64) {
        lock(&self.metrics).gauges.insert(self.key.clone(), value);
    }
}

impl Recorder for RunRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(CounterHandle {
            metrics: self.metrics.clone(),
            key: owned_key(key),
        }))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::from_arc(Arc::new(GaugeHandle {
            metrics: self.metrics.clone(),
            key: owned_key(key),
        }))
    }

    fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

/// Emit the simulated and theoretical values of a comparison as gauges.
///
/// Gauges are labelled with `model` and `metric` (`queue_wait`,
/// `service_time` or `system_time`). Relative errors are only emitted when
/// defined.
pub fn publish_gauges(comparison: &Comparison) {
    let model = comparison.model.to_string();
    let metrics: [(&'static str, &MetricComparison); 3] = [
        ("queue_wait", &comparison.queue_wait),
        ("service_time", &comparison.service_time),
        ("system_time", &comparison.system_time),
    ];

    gauge!("qsim_utilization", "model" => model.clone()).set(comparison.utilization);
    for (metric, values) in metrics {
        gauge!("qsim_simulated_mean", "model" => model.clone(), "metric" => metric)
            .set(values.simulated);
        gauge!("qsim_theoretical_mean", "model" => model.clone(), "metric" => metric)
            .set(values.theoretical);
        if let Some(error) = values.relative_error {
            gauge!("qsim_relative_error", "model" => model.clone(), "metric" => metric).set(error);
        }
    }
}
