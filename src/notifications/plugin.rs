// SPDX-License-Identifier: MPL-2.0
//! Plugin installation: validates options and wires a notifier to the bus.

use super::notifier::{NotifyEvent, Notifier};
use crate::config::defaults::{DEFAULT_COMPONENT_NAME, DEFAULT_REGISTRATION_NAME};
use crate::config::{ComponentProps, Config, PluginOptions};
use crate::error::InstallError;
use crate::event_bus::EventBus;

/// How the host should bring the rendering component to life.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentRegistration {
    /// Mount one default component with these props.
    Mount {
        component_name: String,
        props: ComponentProps,
    },
    /// Register the component under this name; the host places instances itself.
    Register { component_name: String },
}

impl ComponentRegistration {
    #[must_use]
    pub fn component_name(&self) -> &str {
        match self {
            ComponentRegistration::Mount { component_name, .. }
            | ComponentRegistration::Register { component_name } => component_name,
        }
    }
}

/// Result of a successful installation.
#[derive(Debug, Clone)]
pub struct Installation {
    /// Name the notifier should be exposed under.
    pub registration_name: String,
    pub notifier: Notifier,
    pub component: ComponentRegistration,
}

/// One-shot installer.
#[derive(Debug, Default)]
pub struct Plugin {
    installed_as: Option<String>,
}

impl Plugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed_as.is_some()
    }

    /// Installs the plugin on `bus`.
    ///
    /// Empty names fall back to their defaults. Passing `props` while the host
    /// renders its own component(s) is rejected, as is a second install.
    pub fn install(
        &mut self,
        bus: &EventBus<NotifyEvent>,
        options: PluginOptions,
        props: Option<ComponentProps>,
    ) -> Result<Installation, InstallError> {
        if let Some(name) = &self.installed_as {
            tracing::warn!(name = %name, "plugin install attempted twice");
            return Err(InstallError::AlreadyInstalled(name.clone()));
        }
        let host_renders = options.host_renders();
        if host_renders && props.is_some() {
            tracing::warn!(
                custom_component = options.custom_component,
                multiple_components = options.multiple_components,
                "component props rejected"
            );
            return Err(InstallError::PropsWithCustomComponent);
        }

        let registration_name = non_empty_or(options.name, DEFAULT_REGISTRATION_NAME);
        let component_name = non_empty_or(options.component_name, DEFAULT_COMPONENT_NAME);
        let component = if host_renders {
            ComponentRegistration::Register { component_name }
        } else {
            ComponentRegistration::Mount {
                component_name,
                props: props.unwrap_or_default(),
            }
        };

        tracing::info!(
            name = %registration_name,
            component = component.component_name(),
            "notification plugin installed"
        );
        self.installed_as = Some(registration_name.clone());

        Ok(Installation {
            registration_name,
            notifier: Notifier::new(bus.clone()),
            component,
        })
    }

    /// Installs using the `[plugin]` and `[component]` tables of a config file.
    pub fn install_from_config(
        &mut self,
        bus: &EventBus<NotifyEvent>,
        config: &Config,
    ) -> Result<Installation, InstallError> {
        self.install(bus, config.plugin.clone(), config.component.clone())
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_install_mounts_default_component() {
        let bus = EventBus::new();
        let installation = Plugin::new()
            .install(&bus, PluginOptions::default(), None)
            .expect("install should succeed");

        assert_eq!(installation.registration_name, "notify");
        assert_eq!(
            installation.component,
            ComponentRegistration::Mount {
                component_name: "Notifications".to_string(),
                props: ComponentProps::default(),
            }
        );
    }

    #[test]
    fn empty_names_fall_back_to_defaults() {
        let options = PluginOptions {
            name: String::new(),
            component_name: String::new(),
            ..PluginOptions::default()
        };
        let installation = Plugin::new()
            .install(&EventBus::new(), options, None)
            .unwrap();
        assert_eq!(installation.registration_name, "notify");
        assert_eq!(installation.component.component_name(), "Notifications");
    }

    #[test]
    fn custom_component_only_registers() {
        let options = PluginOptions {
            custom_component: true,
            component_name: "Toasts".to_string(),
            ..PluginOptions::default()
        };
        let installation = Plugin::new()
            .install(&EventBus::new(), options, None)
            .unwrap();
        assert_eq!(
            installation.component,
            ComponentRegistration::Register {
                component_name: "Toasts".to_string()
            }
        );
    }

    #[test]
    fn props_with_custom_or_multiple_components_are_rejected() {
        for (custom, multiple) in [(true, false), (false, true), (true, true)] {
            let options = PluginOptions {
                custom_component: custom,
                multiple_components: multiple,
                ..PluginOptions::default()
            };
            let err = Plugin::new()
                .install(&EventBus::new(), options, Some(ComponentProps::default()))
                .unwrap_err();
            assert_eq!(err, InstallError::PropsWithCustomComponent);
        }
    }

    #[test]
    fn second_install_fails() {
        let bus = EventBus::new();
        let mut plugin = Plugin::new();
        plugin
            .install(&bus, PluginOptions::default(), None)
            .unwrap();
        assert!(plugin.is_installed());

        let err = plugin
            .install(&bus, PluginOptions::default(), None)
            .unwrap_err();
        assert_eq!(err, InstallError::AlreadyInstalled("notify".to_string()));
    }

    #[test]
    fn rejected_install_leaves_plugin_installable() {
        let bus = EventBus::new();
        let mut plugin = Plugin::new();
        let options = PluginOptions {
            multiple_components: true,
            ..PluginOptions::default()
        };
        assert!(plugin
            .install(&bus, options, Some(ComponentProps::default()))
            .is_err());
        assert!(!plugin.is_installed());
        assert!(plugin.install(&bus, PluginOptions::default(), None).is_ok());
    }

    #[test]
    fn notifier_emits_on_the_given_bus() {
        let bus = EventBus::new();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let sink = std::rc::Rc::clone(&seen);
        bus.subscribe("clearAll", move |_: &NotifyEvent| sink.set(sink.get() + 1));

        let installation = Plugin::new()
            .install(&bus, PluginOptions::default(), None)
            .unwrap();
        installation.notifier.clear_all();

        assert_eq!(seen.get(), 1);
    }
}
