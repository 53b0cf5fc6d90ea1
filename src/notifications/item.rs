// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `NotifyItem` record and the `NotificationType`
//! enum carried on the bus from the notifier to the manager.

use serde::{Deserialize, Serialize};

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Something worth attention that did not block the operation.
    Warning,
    /// Something failed.
    Error,
}

impl NotificationType {
    /// Lowercase name, as used in CSS class names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyItem {
    /// Caller-chosen id, or assigned by the notifier when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Message body.
    #[serde(alias = "message")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(alias = "groupName", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Milliseconds before auto-dismiss. Negative keeps the toast until closed;
    /// `None` defers to the component default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Enter/leave animation length in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u64>,
    /// Free-form payload handed back to custom templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl NotifyItem {
    /// Creates an info notification with the given message.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text).with_type(NotificationType::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text).with_type(NotificationType::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text).with_type(NotificationType::Error)
    }

    #[must_use]
    pub fn with_type(mut self, kind: NotificationType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the auto-dismiss delay in milliseconds (negative for sticky).
    #[must_use]
    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed = Some(speed_ms);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Same title, text and type; ids and timing are not compared.
    #[must_use]
    pub fn is_duplicate_of(&self, other: &NotifyItem) -> bool {
        self.title == other.title && self.text == other.text && self.kind == other.kind
    }
}

/// Argument accepted by [`Notifier::notify`](super::Notifier::notify): a bare
/// message or a full item.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyParams {
    Text(String),
    Item(NotifyItem),
}

impl NotifyParams {
    /// Normalizes a bare message into an item carrying only that text.
    #[must_use]
    pub fn into_item(self) -> NotifyItem {
        match self {
            NotifyParams::Text(text) => NotifyItem::new(text),
            NotifyParams::Item(item) => item,
        }
    }
}

impl From<&str> for NotifyParams {
    fn from(text: &str) -> Self {
        NotifyParams::Text(text.to_string())
    }
}

impl From<String> for NotifyParams {
    fn from(text: String) -> Self {
        NotifyParams::Text(text)
    }
}

impl From<NotifyItem> for NotifyParams {
    fn from(item: NotifyItem) -> Self {
        NotifyParams::Item(item)
    }
}
