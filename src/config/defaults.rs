// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Plugin**: registration and component names
//! - **Timing**: auto-dismiss and animation durations
//! - **Layout**: container width and position

// ==========================================================================
// Plugin Defaults
// ==========================================================================

/// Name the notifier is registered under (`$notify` / `inject('notify')`).
pub const DEFAULT_REGISTRATION_NAME: &str = "notify";

/// Name of the rendering component.
pub const DEFAULT_COMPONENT_NAME: &str = "Notifications";

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Milliseconds a notification stays visible before auto-dismiss.
pub const DEFAULT_DURATION_MS: i64 = 3000;

/// Enter/leave animation length in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 300;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Container width.
pub const DEFAULT_WIDTH: &str = "300px";

/// Container position keyword.
pub const DEFAULT_POSITION: &str = "top-right";
