// SPDX-License-Identifier: MPL-2.0
//! Toast notifications driven by an event bus.
//!
//! Application code talks to a [`Notifier`]; a [`Manager`] on the other side of
//! the bus keeps the visible list and dismisses toasts when their timers run
//! out. The two never reference each other directly.
//!
//! # Components
//!
//! - [`item`] - `NotifyItem` and `NotificationType`, the notification payload
//! - [`notifier`] - `Notifier`, the `notify` surface, and the bus event names
//! - [`manager`] - `Manager`, headless state for a rendering component
//! - [`plugin`] - `Plugin`, which validates options and wires everything up
//!
//! # Usage
//!
//! ```
//! use omni_notify::config::{ComponentProps, PluginOptions};
//! use omni_notify::event_bus::EventBus;
//! use omni_notify::notifications::{ComponentRegistration, Manager, Plugin};
//! use omni_notify::timer::ManualScheduler;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let bus = EventBus::new();
//! let installation = Plugin::new()
//!     .install(&bus, PluginOptions::default(), None)
//!     .unwrap();
//!
//! let props = match installation.component {
//!     ComponentRegistration::Mount { props, .. } => props,
//!     ComponentRegistration::Register { .. } => ComponentProps::default(),
//! };
//! let clock = ManualScheduler::new();
//! let manager = Manager::attach(&bus, Rc::new(clock.clone()), props).unwrap();
//!
//! let id = installation.notifier.show("Saved");
//! assert!(manager.contains(id));
//!
//! clock.advance(Duration::from_secs(3));
//! assert!(manager.is_empty());
//! ```

mod item;
mod manager;
mod notifier;
mod plugin;

pub use item::{NotificationType, NotifyItem, NotifyParams};
pub use manager::Manager;
pub use notifier::{event_names, NotifyEvent, Notifier};
pub use plugin::{ComponentRegistration, Installation, Plugin};
