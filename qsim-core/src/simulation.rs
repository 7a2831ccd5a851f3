//! The single-server event loop.
//!
//! Entities go `NotArrived -> Queued -> InService -> Departed`. Arrivals either
//! start service at once or join the [`WaitingLine`]; each departure frees the
//! server for the front of the line. The loop only dispatches events strictly
//! before the horizon. Events scheduled at or past it stay in the queue and
//! the entities they belong to are never counted. A scheduling failure stops
//! the run and is reported by [`Simulation::run`].

use std::collections::HashMap;

use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use crate::config::{validate_horizon, SimulationConfig};
use crate::dists::{ArrivalPattern, PoissonArrivals};
use crate::error::{EventError, SimError};
use crate::execute::{Execute, Executor};
use crate::ids::{derive_seed, EntityIdSequence, SEED_DOMAIN_ARRIVALS, SEED_DOMAIN_SERVICE};
use crate::ledger::{mean, RunningMeanPoint, StatisticsLedger};
use crate::logging::{event_span, events, simulation_span};
use crate::queue::WaitingLine;
use crate::randomness::SeededSource;
use crate::scheduler::{Event, EventKind, Scheduler};
use crate::server::{Server, ServerState, ServicePolicy};
use crate::types::EntityId;
use crate::SimTime;

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    pub event: Event,
    /// Entity that entered service while handling the event
    pub started_service: Option<EntityId>,
    /// Server occupancy after the event
    pub server_state: ServerState,
    /// Waiting line length after the event
    pub waiting_line_len: usize,
}

/// Counts describing how a run ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Arrival events dispatched
    pub arrivals: u64,
    /// Departure events dispatched
    pub departures: u64,
    /// Entities that arrived but had not departed when the run stopped
    pub left_in_system: u64,
    /// Events dispatched in total
    pub events_processed: u64,
    /// Time of the last dispatched event
    pub final_time: SimTime,
    pub horizon: SimTime,
}

/// Everything a run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    /// Waiting time in queue (arrival to service start), one per departure
    pub queue_waits: Vec<f64>,
    /// Service durations, one per service started
    pub service_times: Vec<f64>,
    /// Time in system (arrival to departure), one per departure
    pub system_times: Vec<f64>,
    /// Running mean of `queue_waits`, one point per departure
    pub running_mean: Vec<RunningMeanPoint>,
    pub summary: RunSummary,
}

impl ResultBundle {
    /// Mean queue wait, 0 when nobody departed.
    pub fn mean_queue_wait(&self) -> f64 {
        mean(&self.queue_waits)
    }

    pub fn mean_service_time(&self) -> f64 {
        mean(&self.service_times)
    }

    pub fn mean_system_time(&self) -> f64 {
        mean(&self.system_times)
    }

    /// True when no entity completed service.
    pub fn is_empty(&self) -> bool {
        self.queue_waits.is_empty()
    }
}

/// One run of the single-server queue.
///
/// The simulation exclusively owns its event queue, waiting line, per-entity
/// timestamps and ledger until [`Simulation::into_results`].
pub struct Simulation {
    arrivals: Box<dyn ArrivalPattern>,
    server: Server,
    line: WaitingLine,
    scheduler: Scheduler,
    ids: EntityIdSequence,
    ledger: StatisticsLedger,
    state: ServerState,
    horizon: SimTime,
    arrival_times: HashMap<EntityId, SimTime>,
    service_starts: HashMap<EntityId, SimTime>,
    arrivals_dispatched: u64,
    events_processed: u64,
    failure: Option<SimError>,
}

impl Simulation {
    /// Build a run from `config`, deriving independent arrival and service
    /// streams from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `config` fails validation.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let arrival_source =
            SeededSource::new(config.seed.map(|s| derive_seed(s, SEED_DOMAIN_ARRIVALS)));
        let service_source =
            SeededSource::new(config.seed.map(|s| derive_seed(s, SEED_DOMAIN_SERVICE)));
        debug!(
            arrival_rate = config.arrival_rate,
            service_rate = config.service_rate,
            horizon = config.horizon,
            policy = ?config.service_policy,
            seed = ?config.seed,
            "Building simulation"
        );
        let arrivals = PoissonArrivals::new(config.arrival_rate, arrival_source)?;
        let server = Server::new(config.service_policy, config.service_rate, service_source)?;
        Self::from_parts(arrivals, server, WaitingLine::new(), config.horizon)
    }

    /// Build a run from caller-constructed collaborators.
    ///
    /// The first arrival (entity 0) is scheduled here, one inter-arrival gap
    /// after time zero.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if `horizon` is negative or
    /// non-finite, or `line` is not empty, and [`SimError::Event`] if the
    /// first inter-arrival gap cannot be scheduled.
    pub fn from_parts(
        arrivals: impl ArrivalPattern + 'static,
        server: Server,
        line: WaitingLine,
        horizon: f64,
    ) -> Result<Self, SimError> {
        let horizon = SimTime::from(validate_horizon(horizon)?);
        if !line.is_empty() {
            return Err(SimError::Configuration(format!(
                "waiting line must start empty, holds {} entities",
                line.len()
            )));
        }
        let mut sim = Self {
            arrivals: Box::new(arrivals),
            server,
            line,
            scheduler: Scheduler::default(),
            ids: EntityIdSequence::new(),
            ledger: StatisticsLedger::new(),
            state: ServerState::Idle,
            horizon,
            arrival_times: HashMap::new(),
            service_starts: HashMap::new(),
            arrivals_dispatched: 0,
            events_processed: 0,
            failure: None,
        };
        let first_gap = sim.arrivals.next_inter_arrival();
        let first = sim.ids.next_id();
        sim.scheduler.schedule_in(first_gap, EventKind::Arrival, first)?;
        Ok(sim)
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.scheduler.time()
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn server_state(&self) -> ServerState {
        self.state
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn waiting_line(&self) -> &WaitingLine {
        &self.line
    }

    pub fn ledger(&self) -> &StatisticsLedger {
        &self.ledger
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// The departure scheduled for the entity in service, if any.
    pub fn pending_departure(&self) -> Option<&Event> {
        self.scheduler.pending(EventKind::Departure).next()
    }

    /// The scheduling error that stopped the run, if any.
    pub fn failure(&self) -> Option<&SimError> {
        self.failure.as_ref()
    }

    /// True once no event remains before the horizon or the run has failed.
    pub fn is_finished(&self) -> bool {
        self.failure.is_some()
            || self
                .scheduler
                .peek()
                .map_or(true, |event| event.time >= self.horizon)
    }

    /// Dispatches the next event if it lies strictly before the horizon.
    ///
    /// Returns `None` once the run is finished. An event whose follow-up
    /// cannot be scheduled records a [`Simulation::failure`] and
    /// also returns `None`.
    pub fn step(&mut self) -> Option<Dispatch> {
        if self.is_finished() {
            return None;
        }
        let event = self.scheduler.pop()?;
        let _span = event_span(&event).entered();
        self.events_processed += 1;
        events::event_dispatched(&event);

        let handled = match event.kind {
            EventKind::Arrival => self.handle_arrival(&event),
            EventKind::Departure => self.handle_departure(&event),
        };
        let started_service = match handled {
            Ok(started) => started,
            Err(err) => {
                warn!(
                    event = %event.id,
                    error = %err,
                    "Stopping run: event could not be scheduled"
                );
                self.failure = Some(err.into());
                return None;
            }
        };
        gauge!("qsim_waiting_line_length").set(self.line.len() as f64);

        Some(Dispatch {
            event,
            started_service,
            server_state: self.state,
            waiting_line_len: self.line.len(),
        })
    }

    fn handle_arrival(&mut self, event: &Event) -> Result<Option<EntityId>, EventError> {
        let now = event.time;
        self.arrival_times.insert(event.entity, now);
        self.arrivals_dispatched += 1;
        counter!("qsim_arrivals_total").increment(1);

        let started = match self.state {
            ServerState::Idle => {
                self.start_service(event.entity, now)?;
                Some(event.entity)
            }
            ServerState::Busy(_) => {
                self.line.push(event.entity);
                trace!(
                    entity = %event.entity,
                    queued = self.line.len(),
                    "Entity joined waiting line"
                );
                None
            }
        };

        if now < self.horizon {
            let gap = self.arrivals.next_inter_arrival();
            if now.as_f64() + gap <= self.horizon.as_f64() {
                let next = self.ids.next_id();
                self.scheduler.schedule_in(gap, EventKind::Arrival, next)?;
            }
        }
        Ok(started)
    }

    fn handle_departure(&mut self, event: &Event) -> Result<Option<EntityId>, EventError> {
        let now = event.time;
        counter!("qsim_departures_total").increment(1);

        if self.state.in_service() != Some(event.entity) {
            warn!(
                entity = %event.entity,
                state = ?self.state,
                "Departure for an entity that is not in service"
            );
        }

        let start = self.service_starts.remove(&event.entity).unwrap_or_else(|| {
            warn!(entity = %event.entity, "No service start recorded, using departure time");
            now
        });
        let arrival = self.arrival_times.remove(&event.entity).unwrap_or_else(|| {
            warn!(entity = %event.entity, "No arrival recorded, using departure time");
            now
        });
        let queue_wait = start.duration_since(arrival);
        let system_time = now.duration_since(arrival);
        self.ledger.record_departure(now, queue_wait, system_time);

        match self.line.pop() {
            Some(next) => {
                self.start_service(next, now)?;
                Ok(Some(next))
            }
            None => {
                self.state = ServerState::Idle;
                Ok(None)
            }
        }
    }

    fn start_service(&mut self, entity: EntityId, now: SimTime) -> Result<(), EventError> {
        let duration = self.server.sample_duration();
        let id = self.scheduler.schedule_in(duration, EventKind::Departure, entity)?;
        self.state = ServerState::Busy(entity);
        self.service_starts.insert(entity, now);
        self.ledger.record_service(duration);
        trace!(entity = %entity, duration, departure = %id, "Service started");
        Ok(())
    }

    /// Runs the simulation until the executor's stopping condition.
    #[instrument(skip(self, executor), fields(horizon = %self.horizon))]
    pub fn execute<E: Execute>(&mut self, executor: E) {
        events::simulation_started(self.horizon, self.server.policy());
        executor.execute(self);
        events::simulation_completed(self.time(), self.events_processed, self.ledger.departures());
    }

    /// Runs to the horizon and returns the results.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Event`] if an event could not be scheduled, for
    /// example because its time would exceed the largest finite `f64`.
    pub fn run(mut self) -> Result<ResultBundle, SimError> {
        self.execute(Executor::until_horizon());
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(self.into_results()),
        }
    }

    /// Consume the simulation and hand out what it collected.
    pub fn into_results(self) -> ResultBundle {
        let departures = self.ledger.departures() as u64;
        let summary = RunSummary {
            arrivals: self.arrivals_dispatched,
            departures,
            left_in_system: self.arrivals_dispatched - departures,
            events_processed: self.events_processed,
            final_time: self.scheduler.time(),
            horizon: self.horizon,
        };
        let (queue_waits, service_times, system_times, running_mean) = self.ledger.into_parts();
        info!(
            arrivals = summary.arrivals,
            departures = summary.departures,
            left_in_system = summary.left_in_system,
            "Simulation results collected"
        );
        ResultBundle {
            queue_waits,
            service_times,
            system_times,
            running_mean,
            summary,
        }
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("time", &self.time())
            .field("horizon", &self.horizon)
            .field("state", &self.state)
            .field("waiting", &self.line.len())
            .field("pending_events", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}

/// Run one entropy-seeded simulation to `horizon`.
///
/// # Errors
///
/// Returns [`SimError::Configuration`] for non-positive rates or an invalid
/// horizon. No events are processed in that case.
/// Returns [`SimError::Event`] if the run stops on a scheduling failure.
pub fn run(
    arrival_rate: f64,
    service_rate: f64,
    horizon: f64,
    policy: ServicePolicy,
) -> Result<ResultBundle, SimError> {
    run_with_config(&SimulationConfig::new(arrival_rate, service_rate, horizon, policy))
}

/// Run one simulation described by `config`.
///
/// # Errors
///
/// Returns [`SimError::Configuration`] if `config` fails validation and
/// [`SimError::Event`] if the run stops on a scheduling failure.
pub fn run_with_config(config: &SimulationConfig) -> Result<ResultBundle, SimError> {
    let _span = simulation_span(&config.model().to_string()).entered();
    Simulation::new(config)?.run()
}
