// SPDX-License-Identifier: MPL-2.0
//! Pausable single-shot countdown timers.
//!
//! A [`Timer`] counts down toward one invocation of its callback. Hovering a
//! toast pauses the countdown and leaving resumes it with whatever time was
//! left. Timers never talk to the host's clock directly: they run on an
//! injected [`Scheduler`].
//!
//! # Components
//!
//! - [`scheduler`] - the `Scheduler` trait timers are built on
//! - [`manual`] - `ManualScheduler`, a virtual clock advanced by hand
//! - [`runtime`] - `TokioScheduler`, backed by tokio local tasks
//!
//! # Example
//!
//! ```
//! use omni_notify::timer::{ManualScheduler, Scheduler, Timer, TimerState};
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let clock = ManualScheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&fired);
//!
//! let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
//! let timer = Timer::start(scheduler, Duration::from_millis(100), move || flag.set(true));
//!
//! clock.advance(Duration::from_millis(40));
//! timer.pause();
//! clock.advance(Duration::from_secs(10));
//! timer.resume();
//! clock.advance(Duration::from_millis(60));
//!
//! assert!(fired.get());
//! assert_eq!(timer.state(), TimerState::Fired);
//! ```

mod manual;
mod runtime;
mod scheduler;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;
pub use scheduler::{Scheduler, Task, TaskId};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Lifecycle of a [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Counting down; the callback is scheduled.
    Running,
    /// Countdown suspended; nothing is scheduled.
    Paused,
    /// The callback has run. Terminal.
    Fired,
    /// Cancelled by [`Timer::clear`]. Terminal.
    Cleared,
}

impl TimerState {
    /// Returns whether the timer can still fire.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, TimerState::Running | TimerState::Paused)
    }
}

struct TimerInner {
    callback: Option<Box<dyn FnOnce()>>,
    interval: Duration,
    segment_start: Instant,
    remaining: Duration,
    pending: Option<TaskId>,
    /// Bumped on every arm so a stale task can recognise itself.
    generation: u64,
    state: TimerState,
}

/// Single-shot countdown that can be paused, resumed and cleared.
///
/// The callback runs at most once over the timer's lifetime. Dropping the
/// timer cancels any pending invocation.
pub struct Timer {
    inner: Rc<RefCell<TimerInner>>,
    scheduler: Rc<dyn Scheduler>,
}

impl Timer {
    /// Creates a timer and starts counting down immediately.
    pub fn start(
        scheduler: Rc<dyn Scheduler>,
        interval: Duration,
        callback: impl FnOnce() + 'static,
    ) -> Self {
        let inner = TimerInner {
            callback: Some(Box::new(callback)),
            interval,
            segment_start: scheduler.now(),
            remaining: interval,
            pending: None,
            generation: 0,
            state: TimerState::Paused,
        };
        let timer = Self {
            inner: Rc::new(RefCell::new(inner)),
            scheduler,
        };
        timer.arm();
        timer
    }

    /// Suspends the countdown, keeping the time left.
    ///
    /// The remaining time saturates at zero; a timer paused after its deadline
    /// but before its task ran fires on the next turn after [`Timer::resume`].
    /// Only a running timer can be paused.
    pub fn pause(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.state != TimerState::Running {
            return;
        }
        if let Some(id) = inner.pending.take() {
            self.scheduler.cancel(id);
        }
        let elapsed = self
            .scheduler
            .now()
            .saturating_duration_since(inner.segment_start);
        inner.remaining = inner.remaining.saturating_sub(elapsed);
        inner.state = TimerState::Paused;
        tracing::debug!(remaining_ms = inner.remaining.as_millis() as u64, "timer paused");
    }

    /// Restarts the countdown from now with the last recorded remaining time.
    ///
    /// Calling this on a running timer restarts the current segment without
    /// deducting the time that already passed in it. Fired and cleared timers
    /// ignore it.
    pub fn resume(&self) {
        if !self.inner.borrow().state.is_live() {
            tracing::debug!("resume ignored on finished timer");
            return;
        }
        self.arm();
    }

    /// Cancels the timer for good. The callback will never run.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(id) = inner.pending.take() {
            self.scheduler.cancel(id);
        }
        if inner.state != TimerState::Fired {
            inner.state = TimerState::Cleared;
        }
        inner.callback = None;
        tracing::debug!("timer cleared");
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        self.inner.borrow().state
    }

    /// The interval the timer was created with.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.borrow().interval
    }

    /// Time left as of the last pause (or the full interval if never paused).
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.inner.borrow().remaining
    }

    fn arm(&self) {
        let (delay, generation) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(id) = inner.pending.take() {
                self.scheduler.cancel(id);
            }
            inner.generation += 1;
            inner.segment_start = self.scheduler.now();
            inner.state = TimerState::Running;
            (inner.remaining, inner.generation)
        };

        let weak = Rc::downgrade(&self.inner);
        let id = self.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let callback = {
                    let mut inner = inner.borrow_mut();
                    if inner.state != TimerState::Running || inner.generation != generation {
                        return;
                    }
                    inner.pending = None;
                    inner.remaining = Duration::ZERO;
                    inner.state = TimerState::Fired;
                    inner.callback.take()
                };
                tracing::debug!("timer fired");
                if let Some(callback) = callback {
                    callback();
                }
            }),
        );
        self.inner.borrow_mut().pending = Some(id);
        tracing::debug!(delay_ms = delay.as_millis() as u64, "timer armed");
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let pending = match self.inner.try_borrow_mut() {
            Ok(mut inner) => inner.pending.take(),
            Err(_) => None,
        };
        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Timer")
            .field("state", &inner.state)
            .field("interval", &inner.interval)
            .field("remaining", &inner.remaining)
            .finish()
    }
}
