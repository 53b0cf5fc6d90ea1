// SPDX-License-Identifier: MPL-2.0
//! `omni_notify` is a small toast notification library.
//!
//! Application code enqueues notifications through a [`Notifier`](notifications::Notifier),
//! which publishes them on a typed [`EventBus`](event_bus::EventBus). A headless
//! [`Manager`](notifications::Manager) subscribes to the bus, keeps the visible list
//! in order and dismisses each toast with a pausable [`Timer`](timer::Timer).
//! Layout props such as the container width and position keyword are parsed
//! by the [`layout`] module.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod layout;
pub mod notifications;
pub mod timer;
