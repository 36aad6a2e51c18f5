//! Epoch-guarded deferred tasks on a logical clock.
//!
//! The only suspension point in a game is the pause after a mismatch.
//! Rather than sleeping, the state machine schedules a task here and the
//! shell drives time forward with `advance`, or fires a task early with
//! `take` when it runs its own timer.
//!
//! Every handle carries the epoch it was scheduled in. `invalidate`
//! bumps the epoch and drops everything pending, so a handle from a
//! discarded board can never run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Ticket for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle {
    epoch: u64,
    id: u64,
}

impl TaskHandle {
    /// Board generation this task belongs to.
    #[must_use]
    pub fn epoch(self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn id(self) -> u64 {
        self.id
    }
}

/// What a deferred task does when it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Turn a mismatched pair face-down and pass the turn.
    FlipBack { first: CardId, second: CardId },
}

/// A task waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredTask {
    pub handle: TaskHandle,
    /// Logical time at which the task becomes due.
    pub due_at: Duration,
    pub kind: TaskKind,
}

/// Pending tasks plus the clock and epoch that govern them.
#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    now: Duration,
    epoch: u64,
    next_id: u64,
    pending: Vec<DeferredTask>,
}

impl DeferredQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical time elapsed since the queue was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &DeferredTask> {
        self.pending.iter()
    }

    /// Schedule `kind` to run `delay` from now.
    ///
    /// Deadlines past the end of the clock saturate at `Duration::MAX`.
    pub fn schedule(&mut self, delay: Duration, kind: TaskKind) -> TaskHandle {
        let handle = TaskHandle {
            epoch: self.epoch,
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.push(DeferredTask {
            handle,
            due_at: self.now.saturating_add(delay),
            kind,
        });
        handle
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.due_at).min()
    }

    /// Move the clock forward and remove every task now due.
    ///
    /// Due tasks are returned in deadline order. The clock saturates at
    /// `Duration::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DeferredTask> {
        self.now = self.now.saturating_add(elapsed);

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_at <= now);
        self.pending = waiting;

        due.sort_by_key(|t| (t.due_at, t.handle.id));
        due
    }

    /// Remove a task ahead of its deadline.
    ///
    /// Returns `None` for stale handles and for tasks that already ran.
    pub fn take(&mut self, handle: TaskHandle) -> Option<DeferredTask> {
        if handle.epoch != self.epoch {
            return None;
        }
        let index = self.pending.iter().position(|t| t.handle == handle)?;
        Some(self.pending.remove(index))
    }

    /// Whether `handle` was issued in the current epoch.
    #[must_use]
    pub fn is_current(&self, handle: TaskHandle) -> bool {
        handle.epoch == self.epoch
    }

    /// Start a new epoch, discarding all pending work and rewinding the
    /// clock to zero.
    ///
    /// Returns the new epoch.
    pub fn invalidate(&mut self) -> u64 {
        self.pending.clear();
        self.now = Duration::ZERO;
        self.epoch += 1;
        self.epoch
    }
}
