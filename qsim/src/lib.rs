//! # qsim - Queueing-theory validation by simulation
//!
//! Simulates M/M/1 and M/D/1 queues event by event and compares the observed
//! waiting times with the closed-form steady-state results.
//!
//! ## Feature Flags
//!
//! - `default`: Includes `metrics`
//! - `metrics`: Summary statistics, theory comparison, sweeps and export
//!
//! ## Example
//!
//! ```rust
//! use qsim::prelude::*;
//!
//! let config = SimulationConfig::md1(0.5, 1.0, 5_000.0).with_seed(3);
//! let results = run_with_config(&config).unwrap();
//! let comparison = Comparison::new(config.model(), 0.5, 1.0, &results);
//! assert_eq!(comparison.queue_wait.theoretical, 0.5);
//! ```

pub use qsim_core as core;

#[cfg(feature = "metrics")]
pub use qsim_metrics as metrics;

pub mod prelude {
    //! Commonly used types and functions

    pub use qsim_core::{
        run, run_with_config, theoretical_wq, Execute, Executor, QueueModel, ResultBundle,
        ServicePolicy, SimError, SimTime, Simulation, SimulationConfig,
    };

    #[cfg(feature = "metrics")]
    pub use qsim_metrics::{sweep_utilization, Comparison, MetricsError, SampleStats, SweepPoint};
}
