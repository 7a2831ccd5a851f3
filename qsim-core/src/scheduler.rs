use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::types::{EntityId, EventId};
use crate::SimTime;

/// What happens to an entity at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Arrival => "arrival",
            EventKind::Departure => "departure",
        }
    }
}

/// Entry stored in the scheduler's priority queue.
///
/// Entries are ordered by time, then by [`EventId`], so events sharing a
/// timestamp are dispatched in the order they were scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub time: SimTime,
    pub kind: EventKind,
    pub entity: EntityId,
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the ordering for min-heap behavior in BinaryHeap
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Scheduler keeps the current time and the upcoming events.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_event_id: u64,
    events: BinaryHeap<Event>,
    clock: SimTime,
}

impl Scheduler {
    /// Schedules `kind` for `entity` at absolute time `time`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::ScheduleInPast`] if `time` is before the current time.
    pub fn schedule_at(
        &mut self,
        time: SimTime,
        kind: EventKind,
        entity: EntityId,
    ) -> Result<EventId, EventError> {
        if time < self.clock {
            return Err(EventError::ScheduleInPast {
                time: time.as_f64(),
                now: self.clock.as_f64(),
            });
        }
        Ok(self.push(time, kind, entity))
    }

    /// Schedules `kind` for `entity` at `self.time() + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidDelay`] if `delay` is negative or
    /// non-finite, and [`EventError::TimeOverflow`] if the resulting time is
    /// not finite.
    pub fn schedule_in(
        &mut self,
        delay: f64,
        kind: EventKind,
        entity: EntityId,
    ) -> Result<EventId, EventError> {
        if !(delay.is_finite() && delay >= 0.0) {
            return Err(EventError::InvalidDelay { delay });
        }
        let now = self.clock.as_f64();
        let time = SimTime::try_new(now + delay).ok_or(EventError::TimeOverflow { now, delay })?;
        self.schedule_at(time, kind, entity)
    }

    fn push(&mut self, time: SimTime, kind: EventKind, entity: EntityId) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        self.events.push(Event {
            id,
            time,
            kind,
            entity,
        });
        id
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.clock
    }

    /// Returns a reference to the next scheduled event or `None` if none are left.
    pub fn peek(&self) -> Option<&Event> {
        self.events.peek()
    }

    /// Removes and returns the next scheduled event, advancing the clock to it.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop().inspect(|event| {
            self.clock = event.time;
        })
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pending events of `kind`.
    pub fn pending(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pop_in_time_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(3.0, EventKind::Arrival, EntityId(0)).unwrap();
        scheduler.schedule_in(1.0, EventKind::Arrival, EntityId(1)).unwrap();
        scheduler.schedule_in(2.0, EventKind::Departure, EntityId(2)).unwrap();

        let order: Vec<_> = std::iter::from_fn(|| scheduler.pop()).map(|e| e.entity).collect();
        assert_eq!(order, vec![EntityId(1), EntityId(2), EntityId(0)]);
        assert_eq!(scheduler.time(), SimTime::from(3.0));
    }

    #[test]
    fn test_equal_times_dispatch_in_scheduling_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(1.0, EventKind::Departure, EntityId(0)).unwrap();
        scheduler.schedule_in(1.0, EventKind::Arrival, EntityId(1)).unwrap();
        scheduler.schedule_in(1.0, EventKind::Departure, EntityId(2)).unwrap();

        let kinds: Vec<_> = std::iter::from_fn(|| scheduler.pop())
            .map(|e| (e.kind, e.entity))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (EventKind::Departure, EntityId(0)),
                (EventKind::Arrival, EntityId(1)),
                (EventKind::Departure, EntityId(2)),
            ]
        );
    }

    #[test]
    fn test_schedule_in_past_is_rejected() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(5.0, EventKind::Arrival, EntityId(0)).unwrap();
        scheduler.pop();
        let err = scheduler
            .schedule_at(SimTime::from(1.0), EventKind::Arrival, EntityId(1))
            .unwrap_err();
        assert_eq!(err, EventError::ScheduleInPast { time: 1.0, now: 5.0 });
        assert!(scheduler
            .schedule_at(SimTime::from(5.0), EventKind::Arrival, EntityId(1))
            .is_ok());
    }

    #[test]
    fn test_peek_and_len() {
        let mut scheduler = Scheduler::default();
        assert!(scheduler.peek().is_none());
        assert!(scheduler.is_empty());
        let id = scheduler.schedule_in(0.5, EventKind::Arrival, EntityId(0)).unwrap();
        assert_eq!(scheduler.peek().map(|e| e.id), Some(id));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pending(EventKind::Departure).count(), 0);
        // Peeking does not advance the clock.
        assert_eq!(scheduler.time(), SimTime::zero());
    }

    #[test]
    fn test_invalid_delays_are_rejected() {
        let mut scheduler = Scheduler::default();
        for delay in [-1.0, f64::NAN, f64::INFINITY] {
            let err = scheduler
                .schedule_in(delay, EventKind::Departure, EntityId(0))
                .unwrap_err();
            assert!(matches!(err, EventError::InvalidDelay { .. }), "{delay}: {err}");
        }
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_time_overflow_is_rejected() {
        let mut scheduler = Scheduler::default();
        scheduler
            .schedule_in(f64::MAX / 2.0, EventKind::Arrival, EntityId(0))
            .unwrap();
        scheduler.pop();
        let err = scheduler
            .schedule_in(f64::MAX, EventKind::Departure, EntityId(0))
            .unwrap_err();
        assert_eq!(
            err,
            EventError::TimeOverflow {
                now: f64::MAX / 2.0,
                delay: f64::MAX
            }
        );
        assert!(scheduler.is_empty());
    }
}
