// SPDX-License-Identifier: MPL-2.0
//! This module handles the plugin configuration, including loading and saving
//! it to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use omni_notify::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.plugin.name = "toast".to_string();
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.plugin.name, "toast");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::layout::MeasurementInput;
use defaults::{
    DEFAULT_COMPONENT_NAME, DEFAULT_DURATION_MS, DEFAULT_POSITION, DEFAULT_REGISTRATION_NAME,
    DEFAULT_SPEED_MS, DEFAULT_WIDTH,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "OmniNotify";

/// Options recognised when installing the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginOptions {
    /// Registration name for the notifier.
    pub name: String,
    /// The host renders its own component instead of the default one.
    pub custom_component: bool,
    /// The host places several component instances (usually one per group).
    pub multiple_components: bool,
    /// Name the rendering component is registered under.
    pub component_name: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_REGISTRATION_NAME.to_string(),
            custom_component: false,
            multiple_components: false,
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }
}

impl PluginOptions {
    /// Returns whether the host is responsible for placing components.
    #[must_use]
    pub fn host_renders(&self) -> bool {
        self.custom_component || self.multiple_components
    }
}

/// Props of one rendering component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentProps {
    /// Only notifications of this group are shown; `None` shows ungrouped ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Container width: a number (pixels) or a `px`/`%`/`auto` string.
    pub width: MeasurementInput,
    /// Position keyword such as `top-right` or `center`.
    pub position: String,
    /// Default auto-dismiss delay in milliseconds; negative keeps toasts open.
    pub duration: i64,
    /// Default animation length in milliseconds.
    pub speed: u64,
    /// Maximum number of visible notifications; the oldest is dropped beyond it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// Newest notification first instead of last.
    pub reverse: bool,
    /// Skip notifications identical to one already shown.
    pub ignore_duplicates: bool,
    pub close_on_click: bool,
    pub pause_on_hover: bool,
}

impl Default for ComponentProps {
    fn default() -> Self {
        Self {
            group: None,
            width: MeasurementInput::from(DEFAULT_WIDTH),
            position: DEFAULT_POSITION.to_string(),
            duration: DEFAULT_DURATION_MS,
            speed: DEFAULT_SPEED_MS,
            max: None,
            reverse: false,
            ignore_duplicates: false,
            close_on_click: true,
            pause_on_hover: true,
        }
    }
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plugin: PluginOptions,
    /// Props for the default component; must stay unset in custom/multiple mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentProps>,
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the user configuration, or defaults when none exists.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file. Malformed TOML is a [`Config`](crate::error::Error::Config) error.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
