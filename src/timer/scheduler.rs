// SPDX-License-Identifier: MPL-2.0
//! Clock and deferred-task facility that timers run on.

use std::time::{Duration, Instant};

/// Identifier of a scheduled task, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Source of time and single-shot deferred execution.
///
/// Implementations must never run a task from inside [`Scheduler::schedule`];
/// even a zero delay runs on a later turn. Cancelling an unknown or already
/// finished task is a no-op.
pub trait Scheduler {
    /// Current instant on this scheduler's clock.
    fn now(&self) -> Instant;

    /// Runs `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> TaskId;

    /// Prevents a scheduled task from running.
    fn cancel(&self, id: TaskId);
}
