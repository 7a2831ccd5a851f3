//! Per-run timing statistics.

use crate::SimTime;
use serde::{Deserialize, Serialize};

/// One point of the running-mean queue-wait series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningMeanPoint {
    /// Departure time at which the mean was taken
    pub time: SimTime,
    /// Mean of all queue waits recorded up to and including this departure
    pub value: f64,
}

/// Arithmetic mean, defined as 0 for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

/// Timing samples accumulated over one run.
///
/// `service_times` grows when a service starts; the other series grow at
/// departures, so `service_times` may hold entries for entities still in
/// service when the run ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsLedger {
    queue_waits: Vec<f64>,
    service_times: Vec<f64>,
    system_times: Vec<f64>,
    running_mean: Vec<RunningMeanPoint>,
    queue_wait_sum: f64,
}

impl StatisticsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the duration of a service that just started.
    pub fn record_service(&mut self, duration: f64) {
        self.service_times.push(duration);
    }

    /// Record a completed entity and extend the running-mean series.
    ///
    /// The k-th running mean is the left-to-right sum of the first k waits
    /// divided by k.
    pub fn record_departure(&mut self, time: SimTime, queue_wait: f64, system_time: f64) {
        self.queue_waits.push(queue_wait);
        self.system_times.push(system_time);
        self.queue_wait_sum += queue_wait;
        let value = self.queue_wait_sum / self.queue_waits.len() as f64;
        self.running_mean.push(RunningMeanPoint { time, value });
    }

    pub fn queue_waits(&self) -> &[f64] {
        &self.queue_waits
    }

    pub fn service_times(&self) -> &[f64] {
        &self.service_times
    }

    pub fn system_times(&self) -> &[f64] {
        &self.system_times
    }

    pub fn running_mean(&self) -> &[RunningMeanPoint] {
        &self.running_mean
    }

    /// Number of entities that completed service.
    pub fn departures(&self) -> usize {
        self.queue_waits.len()
    }

    /// Latest running mean queue wait, 0 before the first departure.
    pub fn current_mean_wait(&self) -> f64 {
        self.running_mean.last().map_or(0.0, |p| p.value)
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<RunningMeanPoint>) {
        (
            self.queue_waits,
            self.service_times,
            self.system_times,
            self.running_mean,
        )
    }
}
