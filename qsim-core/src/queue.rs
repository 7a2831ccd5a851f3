//! FIFO waiting line for entities that found the server busy.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// First-In-First-Out line of waiting entity ids
///
/// Entities leave in exactly the order they joined. All operations are O(1)
/// amortized.
///
/// # Examples
///
/// ```
/// use qsim_core::{EntityId, WaitingLine};
///
/// let mut line = WaitingLine::new();
/// line.push(EntityId(3));
/// line.push(EntityId(4));
/// assert_eq!(line.pop(), Some(EntityId(3)));
/// assert_eq!(line.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitingLine {
    items: VecDeque<EntityId>,
    /// Total number of ids ever pushed
    total_enqueued: u64,
    /// Longest the line has been
    max_len: usize,
}

impl WaitingLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` at the back.
    pub fn push(&mut self, id: EntityId) {
        self.items.push_back(id);
        self.total_enqueued += 1;
        self.max_len = self.max_len.max(self.items.len());
    }

    /// Remove the front id, or `None` when the line is empty.
    pub fn pop(&mut self) -> Option<EntityId> {
        self.items.pop_front()
    }

    /// Front id without removing it.
    pub fn peek(&self) -> Option<EntityId> {
        self.items.front().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_enqueued(&self) -> u64 {
        self.total_enqueued
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
