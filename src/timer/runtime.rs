// SPDX-License-Identifier: MPL-2.0
//! Scheduler backed by tokio's timer wheel.
//!
//! Tasks are spawned with [`tokio::task::spawn_local`], so scheduling must
//! happen inside a [`tokio::task::LocalSet`] on a runtime with the time driver
//! enabled. The clock is [`tokio::time::Instant`], which honours paused time
//! in tests.

use super::scheduler::{Scheduler, Task, TaskId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct RuntimeState {
    next_id: u64,
    handles: HashMap<TaskId, JoinHandle<()>>,
}

/// Runs deferred tasks as local tokio tasks.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    state: Rc<RefCell<RuntimeState>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks spawned and not yet finished or cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().handles.len()
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = TaskId(state.next_id);
        state.next_id += 1;

        let deadline = tokio::time::Instant::now() + delay;
        let registry = Rc::downgrade(&self.state);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().handles.remove(&id);
            }
            task();
        });
        state.handles.insert(id, handle);
        id
    }

    fn cancel(&self, id: TaskId) {
        let handle = self.state.borrow_mut().handles.remove(&id);
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}
