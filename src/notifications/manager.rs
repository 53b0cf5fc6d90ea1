// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` is the state half of a rendering component: it listens on the
//! bus, keeps the list of visible notifications, and runs one auto-dismiss
//! [`Timer`] per notification. Hover pause/resume and click-to-close are
//! exposed as methods for the view layer to call.

use super::item::NotifyItem;
use super::notifier::{event_names, NotifyEvent};
use crate::config::ComponentProps;
use crate::error::ParseError;
use crate::event_bus::{EventBus, Listener};
use crate::layout::{parse_measurement, parse_position, Measurement, Placement};
use crate::timer::{Scheduler, Timer, TimerState};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// A notification currently on screen.
#[derive(Debug)]
struct ActiveNotification {
    /// Manager-local record key; timers dismiss by key, never by id.
    key: u64,
    id: u64,
    item: NotifyItem,
    /// Counting down toward dismissal; false while hovered or sticky.
    is_active: bool,
    timer: Option<Timer>,
}

struct ManagerState {
    props: ComponentProps,
    scheduler: Rc<dyn Scheduler>,
    /// In display order.
    visible: VecDeque<ActiveNotification>,
    next_key: u64,
}

/// Headless notification list bound to an event bus.
///
/// Listeners are removed from the bus when the manager is dropped.
pub struct Manager {
    state: Rc<RefCell<ManagerState>>,
    bus: EventBus<NotifyEvent>,
    listener: Option<Listener<NotifyEvent>>,
    placement: Placement,
    width: Measurement,
}

impl Manager {
    /// Creates a manager and subscribes it to the notification events on `bus`.
    ///
    /// Fails when the `width` prop is not a valid measurement.
    pub fn attach(
        bus: &EventBus<NotifyEvent>,
        scheduler: Rc<dyn Scheduler>,
        props: ComponentProps,
    ) -> Result<Self, ParseError> {
        let width = parse_measurement(props.width.clone())?;
        let placement = parse_position(&props.position);

        let state = Rc::new(RefCell::new(ManagerState {
            props,
            scheduler,
            visible: VecDeque::new(),
            next_key: 0,
        }));

        let weak = Rc::downgrade(&state);
        let listener = Listener::new(move |event: &NotifyEvent| {
            if let Some(state) = weak.upgrade() {
                handle_event(&state, event);
            }
        });
        for name in event_names::ALL {
            bus.on(name, &listener);
        }
        tracing::debug!(group = ?state.borrow().props.group, "notification manager attached");

        Ok(Self {
            state,
            bus: bus.clone(),
            listener: Some(listener),
            placement,
            width,
        })
    }

    /// Stops listening on the bus. Visible notifications keep their timers.
    pub fn detach(&mut self) {
        if let Some(listener) = self.listener.take() {
            for name in event_names::ALL {
                self.bus.off(name, &listener);
            }
            tracing::debug!("notification manager detached");
        }
    }

    /// Currently visible notifications, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<NotifyItem> {
        self.state
            .borrow()
            .visible
            .iter()
            .map(|n| n.item.clone())
            .collect()
    }

    /// Ids of the visible notifications, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<u64> {
        self.state.borrow().visible.iter().map(|n| n.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().visible.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.state.borrow().visible.iter().any(|n| n.id == id)
    }

    /// Returns whether the notification is counting down toward dismissal.
    #[must_use]
    pub fn is_active(&self, id: u64) -> Option<bool> {
        self.state
            .borrow()
            .visible
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.is_active)
    }

    /// State of the notification's auto-dismiss timer, if it has one.
    #[must_use]
    pub fn timer_state(&self, id: u64) -> Option<TimerState> {
        self.state
            .borrow()
            .visible
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.timer.as_ref().map(Timer::state))
    }

    /// Pointer entered the toast: suspend its countdown.
    pub fn pause(&self, id: u64) {
        let mut state = self.state.borrow_mut();
        if !state.props.pause_on_hover {
            return;
        }
        if let Some(n) = state.visible.iter_mut().find(|n| n.id == id) {
            if let Some(timer) = &n.timer {
                timer.pause();
                n.is_active = false;
            }
        }
    }

    /// Pointer left the toast: continue its countdown.
    pub fn resume(&self, id: u64) {
        let mut state = self.state.borrow_mut();
        if !state.props.pause_on_hover {
            return;
        }
        if let Some(n) = state.visible.iter_mut().find(|n| n.id == id) {
            if let Some(timer) = &n.timer {
                timer.resume();
                n.is_active = timer.state() == TimerState::Running;
            }
        }
    }

    /// The toast was clicked. Closes it when `close_on_click` is set.
    pub fn click(&self, id: u64) -> bool {
        if !self.state.borrow().props.close_on_click {
            return false;
        }
        dismiss(&self.state, id)
    }

    /// Removes a notification right away. Returns `true` if it was visible.
    pub fn dismiss(&self, id: u64) -> bool {
        dismiss(&self.state, id)
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn width(&self) -> Measurement {
        self.width
    }

    /// Inline style for the notification container.
    #[must_use]
    pub fn container_style(&self) -> String {
        let position = self.placement.to_css();
        let width = format!("width: {};", self.width);
        if position.is_empty() {
            width
        } else {
            format!("{position} {width}")
        }
    }

    #[must_use]
    pub fn props(&self) -> ComponentProps {
        self.state.borrow().props.clone()
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("visible", &self.visible_ids())
            .field("placement", &self.placement)
            .field("width", &self.width)
            .finish()
    }
}

fn handle_event(state: &Rc<RefCell<ManagerState>>, event: &NotifyEvent) {
    match event {
        NotifyEvent::Add(item) => add(state, item.clone()),
        NotifyEvent::Close(id) => {
            dismiss(state, *id);
        }
        NotifyEvent::ClearGroup(group) => {
            dismiss_where(state, |item| item.group.as_deref() == Some(group.as_str()));
        }
        NotifyEvent::ClearAll => dismiss_where(state, |_| true),
    }
}

fn add(state_rc: &Rc<RefCell<ManagerState>>, item: NotifyItem) {
    let mut state = state_rc.borrow_mut();

    if item.group != state.props.group {
        tracing::trace!(group = ?item.group, "notification for another group ignored");
        return;
    }
    let Some(id) = item.id else {
        tracing::warn!(text = %item.text, "notification without id ignored");
        return;
    };
    if state.props.ignore_duplicates && state.visible.iter().any(|n| n.item.is_duplicate_of(&item)) {
        tracing::debug!(id, "duplicate notification ignored");
        return;
    }

    if state.visible.iter().any(|n| n.id == id) {
        tracing::warn!(id, "notification id already visible, ignored");
        return;
    }

    let key = state.next_key;
    state.next_key += 1;
    let duration = item.duration.unwrap_or(state.props.duration);
    let timer = u64::try_from(duration).ok().map(|ms| {
        let weak: Weak<RefCell<ManagerState>> = Rc::downgrade(state_rc);
        Timer::start(
            Rc::clone(&state.scheduler),
            Duration::from_millis(ms),
            move || {
                if let Some(state) = weak.upgrade() {
                    tracing::debug!(id, "notification expired");
                    remove_first(&state, |n| n.key == key);
                }
            },
        )
    });

    let notification = ActiveNotification {
        key,
        id,
        is_active: timer.is_some(),
        item,
        timer,
    };
    let reverse = state.props.reverse;
    if reverse {
        state.visible.push_front(notification);
    } else {
        state.visible.push_back(notification);
    }
    tracing::debug!(id, duration_ms = duration, "notification shown");

    let evicted = match state.props.max {
        Some(max) if state.visible.len() > max => {
            let excess = state.visible.len() - max;
            let mut evicted = Vec::with_capacity(excess);
            for _ in 0..excess {
                let oldest = if reverse {
                    state.visible.pop_back()
                } else {
                    state.visible.pop_front()
                };
                evicted.extend(oldest);
            }
            evicted
        }
        _ => Vec::new(),
    };
    drop(state);

    for n in evicted {
        tracing::debug!(id = n.id, "notification evicted by max");
        retire(n);
    }
}

fn dismiss(state_rc: &Rc<RefCell<ManagerState>>, id: u64) -> bool {
    remove_first(state_rc, |n| n.id == id)
}

fn remove_first(
    state_rc: &Rc<RefCell<ManagerState>>,
    matches: impl Fn(&ActiveNotification) -> bool,
) -> bool {
    let removed = {
        let mut state = state_rc.borrow_mut();
        let position = state.visible.iter().position(|n| matches(n));
        position.and_then(|pos| state.visible.remove(pos))
    };
    match removed {
        Some(n) => {
            tracing::debug!(id = n.id, "notification dismissed");
            retire(n);
            true
        }
        None => false,
    }
}

fn dismiss_where(state_rc: &Rc<RefCell<ManagerState>>, predicate: impl Fn(&NotifyItem) -> bool) {
    let removed: Vec<ActiveNotification> = {
        let mut state = state_rc.borrow_mut();
        let (gone, kept): (VecDeque<_>, VecDeque<_>) =
            state.visible.drain(..).partition(|n| predicate(&n.item));
        state.visible = kept;
        gone.into_iter().collect()
    };
    tracing::debug!(count = removed.len(), "notifications cleared");
    for n in removed {
        retire(n);
    }
}

/// Stops the timer of a notification leaving the screen.
fn retire(mut n: ActiveNotification) {
    n.is_active = false;
    if let Some(timer) = n.timer.take() {
        timer.clear();
    }
}
