// SPDX-License-Identifier: MPL-2.0
//! The `notify` surface handed to application code.

use super::item::{NotificationType, NotifyItem, NotifyParams};
use crate::event_bus::EventBus;
use std::cell::Cell;
use std::rc::Rc;

/// Bus event names shared by the notifier and the manager.
pub mod event_names {
    pub const ADD: &str = "add";
    pub const CLOSE: &str = "close";
    pub const CLEAR_GROUP: &str = "clearGroup";
    pub const CLEAR_ALL: &str = "clearAll";

    /// Every name the manager listens on.
    pub const ALL: [&str; 4] = [ADD, CLOSE, CLEAR_GROUP, CLEAR_ALL];
}

/// Payload carried on the notification bus.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyEvent {
    /// Show a notification.
    Add(NotifyItem),
    /// Close the notification with this id.
    Close(u64),
    /// Close every notification in a group.
    ClearGroup(String),
    /// Close everything.
    ClearAll,
}

impl NotifyEvent {
    /// Bus event name this payload travels under.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NotifyEvent::Add(_) => event_names::ADD,
            NotifyEvent::Close(_) => event_names::CLOSE,
            NotifyEvent::ClearGroup(_) => event_names::CLEAR_GROUP,
            NotifyEvent::ClearAll => event_names::CLEAR_ALL,
        }
    }
}

/// Enqueues and closes notifications by emitting events on the bus.
///
/// Clones share the id sequence.
#[derive(Debug, Clone)]
pub struct Notifier {
    bus: EventBus<NotifyEvent>,
    next_id: Rc<Cell<u64>>,
}

impl Notifier {
    pub(crate) fn new(bus: EventBus<NotifyEvent>) -> Self {
        Self {
            bus,
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Shows a notification and returns its id.
    ///
    /// A bare string becomes an item with that text. `kind`, when given,
    /// overrides the item's own type. Items without an id get the next one
    /// from a sequence starting at 0; the sequence skips past ids supplied by
    /// the caller.
    pub fn notify(&self, params: impl Into<NotifyParams>, kind: Option<NotificationType>) -> u64 {
        let mut item = params.into().into_item();
        if let Some(kind) = kind {
            item.kind = kind;
        }
        let id = match item.id {
            Some(id) => {
                self.next_id.set(self.next_id.get().max(id.saturating_add(1)));
                id
            }
            None => {
                let id = self.next_id.get();
                self.next_id.set(id + 1);
                item.id = Some(id);
                id
            }
        };

        tracing::debug!(id, kind = item.kind.as_str(), group = ?item.group, "notification queued");
        self.emit(NotifyEvent::Add(item));
        id
    }

    /// Shows a notification with its own type.
    pub fn show(&self, params: impl Into<NotifyParams>) -> u64 {
        self.notify(params, None)
    }

    /// Closes the notification with `id`.
    pub fn close(&self, id: u64) {
        self.emit(NotifyEvent::Close(id));
    }

    /// Closes every notification in `group`.
    pub fn clear_group(&self, group: impl Into<String>) {
        self.emit(NotifyEvent::ClearGroup(group.into()));
    }

    /// Closes every notification.
    pub fn clear_all(&self) {
        self.emit(NotifyEvent::ClearAll);
    }

    fn emit(&self, event: NotifyEvent) {
        self.bus.emit(event.name(), &event);
    }
}
