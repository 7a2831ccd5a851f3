//! Structured logging for queue simulations
//!
//! All engine logging goes through `tracing`. Nothing is printed unless a
//! subscriber is installed, either by the embedding application or with one of
//! the helpers below.
//!
//! # Controlling output
//!
//! ```bash
//! # Default (info level)
//! cargo run --example mm1_convergence
//!
//! # Per-event tracing from the engine
//! RUST_LOG=qsim_core::simulation=trace cargo run --example mm1_convergence
//! ```
//!
//! Level guidelines:
//! - **TRACE**: every dispatched event and service start
//! - **DEBUG**: run configuration
//! - **INFO**: run start, completion and result summary
//! - **WARN**: bookkeeping fallbacks that indicate an engine inconsistency

use crate::server::ServicePolicy;
use crate::scheduler::Event;
use crate::SimTime;
use tracing::{info, trace, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the simulation with sensible defaults
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// `RUST_LOG` takes precedence when set. Does nothing if a global subscriber
/// is already installed.
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{level},qsim_core={level},qsim_metrics={level}").into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Initialize trace-level, pretty-printed logging for debugging a run
pub fn init_detailed_simulation_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace,qsim_core=trace,qsim_metrics=debug".into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Detailed simulation logging initialized");
    }
}

/// Create a span for tracking a whole run
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Create a span for tracking one event
pub fn event_span(event: &Event) -> Span {
    tracing::trace_span!("event",
        id = %event.id,
        kind = event.kind.as_str(),
        time = %event.time
    )
}

/// Logging utilities for common simulation events
pub mod events {
    use super::*;

    /// Log simulation start
    pub fn simulation_started(horizon: SimTime, policy: Option<ServicePolicy>) {
        info!(horizon = %horizon, policy = ?policy, "Simulation started");
    }

    /// Log simulation completion
    pub fn simulation_completed(final_time: SimTime, events_processed: u64, departures: usize) {
        info!(
            final_time = %final_time,
            events_processed,
            departures,
            "Simulation completed"
        );
    }

    /// Log one dispatched event
    pub fn event_dispatched(event: &Event) {
        trace!(
            event_id = %event.id,
            kind = event.kind.as_str(),
            entity = %event.entity,
            time = %event.time,
            "Processing event"
        );
    }
}
