//! A tick-budgeted queue of pending craft moves.
//!
//! Hosts that run on a tick loop cannot afford an unbounded pile of large
//! moves in one slot. The queue drains FIFO under a wall-clock budget: each
//! queued operation runs to completion (moves are not interruptible once
//! committed), and whatever is left over waits for the next slot.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use bevy::prelude::Resource;
use uuid::Uuid;

use crate::{craft::movement::MoveOperation, world::WorldId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One pending move for one craft.
pub struct QueuedMove {
    /// The craft to move, by id.
    pub craft: Uuid,
    /// The operation to apply.
    pub operation: MoveOperation,
    /// Destination world for cross-world moves; `None` stays put.
    pub target_world: Option<WorldId>,
}

#[derive(Debug, Default, Resource)]
/// FIFO queue of pending craft moves, drained under a time budget.
pub struct MoveQueue {
    pending: VecDeque<QueuedMove>,
}

impl MoveQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move to the back of the queue.
    pub fn enqueue(&mut self, queued: QueuedMove) {
        self.pending.push_back(queued);
    }

    /// The number of moves still waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drains queued moves through `apply` until the queue empties or
    /// `budget` elapses, returning how many ran.
    ///
    /// The budget is checked *between* moves; a move that is started always
    /// finishes, so one slot can overrun its budget by at most one move.
    pub fn run_for(&mut self, budget: Duration, mut apply: impl FnMut(QueuedMove)) -> usize {
        let deadline = Instant::now() + budget;
        let mut ran = 0;

        while Instant::now() < deadline {
            let Some(queued) = self.pending.pop_front() else {
                break;
            };

            apply(queued);
            ran += 1;
        }

        ran
    }
}
