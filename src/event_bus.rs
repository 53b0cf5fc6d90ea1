// SPDX-License-Identifier: MPL-2.0
//! In-process publish/subscribe bus keyed by event name.
//!
//! The bus is an explicitly constructed handle: clones share one registry, and
//! independent buses never see each other's listeners.
//!
//! # Design Notes
//!
//! - Listeners are stored at most once per event name (identity is the
//!   [`Listener`] handle, not the closure's behaviour)
//! - A name whose last listener is removed disappears from the registry
//! - Emitting an unknown event is a no-op
//! - `emit` runs listeners synchronously over a snapshot of the listener list,
//!   so a listener may call `on`/`off`/`emit` without deadlocking the registry.
//!   Such changes apply from the next emission of that event.
//!
//! # Example
//!
//! ```
//! use omni_notify::event_bus::{EventBus, Listener};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let bus: EventBus<u32> = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! let listener = Listener::new(move |n: &u32| sink.set(sink.get() + n));
//!
//! bus.on("tick", &listener);
//! bus.emit("tick", &2);
//! bus.off("tick", &listener);
//! bus.emit("tick", &40);
//!
//! assert_eq!(seen.get(), 2);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Handle to a registered callback.
///
/// Cloning the handle keeps the same identity, which is what [`EventBus::off`]
/// matches against.
pub struct Listener<P> {
    callback: Rc<dyn Fn(&P)>,
}

impl<P> Listener<P> {
    /// Wraps a callback in a new listener identity.
    pub fn new(callback: impl Fn(&P) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    fn call(&self, payload: &P) {
        (self.callback)(payload);
    }

    fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.callback), Rc::as_ptr(&other.callback))
    }
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<P> PartialEq for Listener<P> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<P> Eq for Listener<P> {}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Rc::as_ptr(&self.callback))
            .finish()
    }
}

type Registry<P> = HashMap<String, Vec<Listener<P>>>;

/// Publish/subscribe registry carrying payloads of type `P`.
pub struct EventBus<P> {
    registry: Rc<RefCell<Registry<P>>>,
}

impl<P> EventBus<P> {
    /// Creates an empty, independent bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Registers `listener` for `event`. Registering the same handle twice is a no-op.
    pub fn on(&self, event: &str, listener: &Listener<P>) {
        let mut registry = self.registry.borrow_mut();
        let listeners = registry.entry(event.to_string()).or_default();
        if listeners.iter().any(|l| l.same_as(listener)) {
            tracing::trace!(event, "listener already registered");
            return;
        }
        listeners.push(listener.clone());
        tracing::trace!(event, count = listeners.len(), "listener registered");
    }

    /// Creates a listener from `callback`, registers it, and returns the handle.
    pub fn subscribe(&self, event: &str, callback: impl Fn(&P) + 'static) -> Listener<P> {
        let listener = Listener::new(callback);
        self.on(event, &listener);
        listener
    }

    /// Unregisters `listener` from `event`, dropping the entry once it is empty.
    pub fn off(&self, event: &str, listener: &Listener<P>) {
        let mut registry = self.registry.borrow_mut();
        let Some(listeners) = registry.get_mut(event) else {
            return;
        };
        listeners.retain(|l| !l.same_as(listener));
        if listeners.is_empty() {
            registry.remove(event);
            tracing::trace!(event, "last listener removed");
        }
    }

    /// Invokes every listener registered for `event` with `payload`.
    pub fn emit(&self, event: &str, payload: &P) {
        let snapshot = match self.registry.borrow().get(event) {
            Some(listeners) => listeners.clone(),
            None => {
                tracing::trace!(event, "emit without listeners");
                return;
            }
        };

        tracing::trace!(event, listeners = snapshot.len(), "emit");
        for listener in &snapshot {
            listener.call(payload);
        }
    }

    /// Number of listeners currently registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.borrow().get(event).map_or(0, Vec::len)
    }

    /// Returns whether anything listens for `event`.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Number of event names with at least one listener.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.registry.borrow().len()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut events: Vec<(&str, usize)> =
            registry.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        events.sort_unstable();
        f.debug_struct("EventBus").field("events", &events).finish()
    }
}
