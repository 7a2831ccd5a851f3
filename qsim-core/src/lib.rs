//! Discrete event engine for single-server queues.
//!
//! This crate simulates M/M/1 (exponential service) and M/D/1 (constant
//! service) queues with Poisson arrivals and reports per-entity timing
//! statistics, so simulated waiting times can be checked against the
//! closed-form results in [`theory`].
//!
//! # Architecture Overview
//!
//! - [`Simulation`]: owns the event [`Scheduler`], the [`WaitingLine`], the
//!   [`ServerState`] and the [`StatisticsLedger`] for one run.
//! - [`PoissonArrivals`] and [`Server`]: the sampling collaborators, each
//!   holding its own injected [`RandomSource`].
//! - [`Executor`]: drives [`Simulation::step`] until the horizon or for a
//!   fixed number of events, optionally observing every dispatch.
//!
//! # Basic Usage
//!
//! ```rust
//! use qsim_core::{run_with_config, theoretical_wq, SimulationConfig};
//!
//! let config = SimulationConfig::mm1(0.5, 1.0, 2_000.0).with_seed(1);
//! let results = run_with_config(&config).unwrap();
//!
//! println!(
//!     "simulated Wq = {:.3}, theoretical Wq = {:.3}",
//!     results.mean_queue_wait(),
//!     theoretical_wq(config.model(), 0.5, 1.0),
//! );
//! ```
//!
//! # Time Model
//!
//! [`SimTime`] is a non-negative `f64` in the same unit as the rates. Events
//! sharing a timestamp are dispatched in the order they were scheduled.

pub mod config;
pub mod dists;
pub mod error;
pub mod execute;
pub mod ids;
pub mod ledger;
pub mod logging;
pub mod queue;
pub mod randomness;
pub mod scheduler;
pub mod server;
pub mod simulation;
pub mod theory;
pub mod time;
pub mod types;

pub use config::SimulationConfig;
pub use dists::{
    ArrivalPattern, ConstantService, ExponentialService, PoissonArrivals, ServiceTimeDistribution,
};
pub use error::{EventError, SimError};
pub use execute::{Execute, Executor};
pub use ids::EntityIdSequence;
pub use ledger::{RunningMeanPoint, StatisticsLedger};
pub use logging::{
    init_detailed_simulation_logging, init_simulation_logging, init_simulation_logging_with_level,
};
pub use queue::WaitingLine;
pub use randomness::{FixedSequence, RandomSource, SeededSource};
pub use scheduler::{Event, EventKind, Scheduler};
pub use server::{Server, ServerState, ServicePolicy};
pub use simulation::{run, run_with_config, Dispatch, ResultBundle, RunSummary, Simulation};
pub use theory::{theoretical_wq, QueueModel};
pub use time::SimTime;
pub use types::{EntityId, EventId};
