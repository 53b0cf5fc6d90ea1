// SPDX-License-Identifier: MPL-2.0
//! Virtual-clock scheduler driven explicitly by the caller.
//!
//! Time only moves when [`ManualScheduler::advance`] is called, which makes
//! timer behaviour fully deterministic in tests and headless hosts.

use super::scheduler::{Scheduler, Task, TaskId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

struct ManualState {
    origin: Instant,
    elapsed: Duration,
    next_id: u64,
    /// Keyed by (due offset, id) so equal deadlines run in scheduling order.
    pending: BTreeMap<(Duration, u64), Task>,
}

/// Scheduler whose clock is advanced by hand.
///
/// Clones share the same clock and task queue.
#[derive(Clone)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                next_id: 0,
                pending: BTreeMap::new(),
            })),
        }
    }

    /// Moves the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks run in deadline order with the clock set to their deadline, so a
    /// task scheduled by another task inside the window also runs.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().elapsed + by;
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let next_due = state.pending.first_key_value().map(|(&(due, _), _)| due);
                match next_due {
                    Some(due) if due <= target => {
                        state.elapsed = state.elapsed.max(due);
                        state.pending.pop_first().map(|(_, task)| task)
                    }
                    _ => None,
                }
            };
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().elapsed = target;
    }

    /// Runs tasks that are already due without moving the clock.
    pub fn run_due(&self) {
        self.advance(Duration::ZERO);
    }

    /// Time elapsed on the virtual clock since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().elapsed
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("elapsed", &state.elapsed)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        let state = self.state.borrow();
        state.origin + state.elapsed
    }

    fn schedule(&self, delay: Duration, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.elapsed + delay;
        state.pending.insert((due, id), task);
        TaskId(id)
    }

    fn cancel(&self, id: TaskId) {
        // Dropping a task may drop handles whose own drop reaches back into
        // this scheduler, so release the borrow first.
        let removed = {
            let mut state = self.state.borrow_mut();
            let key = state.pending.keys().find(|(_, task_id)| *task_id == id.0).copied();
            key.and_then(|key| state.pending.remove(&key))
        };
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn tasks_run_when_due_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(30), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("early"));
        scheduler.schedule(Duration::from_millis(10), task("early-second"));

        scheduler.advance(Duration::from_millis(9));
        assert!(log.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn cancelled_task_never_runs() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let id = scheduler.schedule(Duration::from_millis(5), task("cancelled"));
        scheduler.cancel(id);
        scheduler.cancel(id);

        scheduler.advance(Duration::from_secs(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn zero_delay_waits_for_a_turn() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        scheduler.schedule(Duration::ZERO, Box::new(move || flag.set(true)));

        assert!(!ran.get());
        scheduler.run_due();
        assert!(ran.get());
    }

    #[test]
    fn clock_follows_advances() {
        let scheduler = ManualScheduler::new();
        let start = scheduler.now();
        scheduler.advance(Duration::from_millis(250));
        assert_eq!(scheduler.now() - start, Duration::from_millis(250));
        assert_eq!(scheduler.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn task_scheduled_by_task_within_window_runs() {
        let scheduler = ManualScheduler::new();
        let ran_at = Rc::new(Cell::new(None));

        let inner = scheduler.clone();
        let slot = Rc::clone(&ran_at);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let clock = inner.clone();
                inner.schedule(
                    Duration::from_millis(5),
                    Box::new(move || slot.set(Some(clock.elapsed()))),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(20));
        assert_eq!(ran_at.get(), Some(Duration::from_millis(15)));
    }
}
