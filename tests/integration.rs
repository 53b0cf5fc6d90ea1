// SPDX-License-Identifier: MPL-2.0
use omni_notify::config::{self, ComponentProps, Config, PluginOptions};
use omni_notify::error::{Error, InstallError};
use omni_notify::event_bus::EventBus;
use omni_notify::notifications::{
    ComponentRegistration, Manager, NotificationType, NotifyItem, Plugin,
};
use omni_notify::timer::{ManualScheduler, TimerState};
use std::rc::Rc;
use std::time::Duration;
use tempfile::tempdir;

fn mount_props(registration: ComponentRegistration) -> ComponentProps {
    match registration {
        ComponentRegistration::Mount { props, .. } => props,
        other => panic!("expected a mounted component, got {other:?}"),
    }
}

#[test]
fn notifier_to_manager_full_lifecycle() {
    let bus = EventBus::new();
    let installation = Plugin::new()
        .install(&bus, PluginOptions::default(), None)
        .expect("install should succeed");
    let props = mount_props(installation.component);
    let clock = ManualScheduler::new();
    let manager = Manager::attach(&bus, Rc::new(clock.clone()), props).expect("valid props");
    let notify = installation.notifier;

    let first = notify.notify("Saved", Some(NotificationType::Success));
    let second = notify.show(NotifyItem::warning("Low disk").with_duration(5000));
    assert_eq!(manager.visible_ids(), vec![first, second]);
    assert_eq!(manager.visible()[0].kind, NotificationType::Success);

    clock.advance(Duration::from_millis(3000));
    assert_eq!(manager.visible_ids(), vec![second]);

    notify.close(second);
    assert!(manager.is_empty());
    assert_eq!(clock.pending_count(), 0);
}

#[test]
fn caller_and_auto_ids_dismiss_independently() {
    let bus = EventBus::new();
    let installation = Plugin::new()
        .install(&bus, PluginOptions::default(), None)
        .unwrap();
    let clock = ManualScheduler::new();
    let manager = Manager::attach(
        &bus,
        Rc::new(clock.clone()),
        mount_props(installation.component),
    )
    .unwrap();
    let notify = installation.notifier;

    let long = notify.show(NotifyItem::new("long").with_id(0).with_duration(10_000));
    let short = notify.show(NotifyItem::new("short").with_duration(100));
    assert_ne!(long, short);
    assert_eq!(manager.visible_ids(), vec![long, short]);

    clock.advance(Duration::from_millis(100));
    assert_eq!(manager.visible_ids(), vec![long]);
    assert_eq!(manager.timer_state(long), Some(TimerState::Running));

    clock.advance(Duration::from_secs(3600));
    assert!(manager.is_empty());
}

#[test]
fn hover_pause_extends_lifetime_through_bus() {
    let bus = EventBus::new();
    let installation = Plugin::new()
        .install(&bus, PluginOptions::default(), None)
        .unwrap();
    let clock = ManualScheduler::new();
    let manager = Manager::attach(
        &bus,
        Rc::new(clock.clone()),
        mount_props(installation.component),
    )
    .unwrap();

    let id = installation.notifier.show("Hover me");
    clock.advance(Duration::from_millis(2000));
    manager.pause(id);
    assert_eq!(manager.timer_state(id), Some(TimerState::Paused));

    clock.advance(Duration::from_secs(60));
    assert!(manager.contains(id));

    manager.resume(id);
    clock.advance(Duration::from_millis(999));
    assert!(manager.contains(id));
    clock.advance(Duration::from_millis(1));
    assert!(!manager.contains(id));
}

#[test]
fn grouped_managers_share_one_bus() {
    let bus = EventBus::new();
    let options = PluginOptions {
        multiple_components: true,
        ..PluginOptions::default()
    };
    let installation = Plugin::new().install(&bus, options, None).unwrap();
    assert!(matches!(
        installation.component,
        ComponentRegistration::Register { .. }
    ));

    let clock = ManualScheduler::new();
    let group = |name: &str| ComponentProps {
        group: Some(name.to_string()),
        ..ComponentProps::default()
    };
    let uploads = Manager::attach(&bus, Rc::new(clock.clone()), group("uploads")).unwrap();
    let alerts = Manager::attach(&bus, Rc::new(clock.clone()), group("alerts")).unwrap();
    let notify = installation.notifier;

    notify.show(NotifyItem::new("a.png uploaded").with_group("uploads"));
    notify.show(NotifyItem::new("b.png uploaded").with_group("uploads"));
    notify.show(NotifyItem::error("Server down").with_group("alerts"));
    notify.show("ungrouped goes nowhere");

    assert_eq!(uploads.len(), 2);
    assert_eq!(alerts.len(), 1);

    notify.clear_group("uploads");
    assert!(uploads.is_empty());
    assert_eq!(alerts.len(), 1);

    notify.clear_all();
    assert!(alerts.is_empty());
}

#[test]
fn max_keeps_the_newest_notifications() {
    let bus = EventBus::new();
    let props = ComponentProps {
        max: Some(3),
        ..ComponentProps::default()
    };
    let installation = Plugin::new()
        .install(&bus, PluginOptions::default(), Some(props))
        .unwrap();
    let clock = ManualScheduler::new();
    let manager = Manager::attach(
        &bus,
        Rc::new(clock.clone()),
        mount_props(installation.component),
    )
    .unwrap();

    let ids: Vec<u64> = (0..5)
        .map(|n| installation.notifier.show(format!("message {n}")))
        .collect();

    assert_eq!(manager.visible_ids(), ids[2..].to_vec());
    assert_eq!(clock.pending_count(), 3);
}

#[test]
fn detached_manager_stops_receiving() {
    let bus = EventBus::new();
    let installation = Plugin::new()
        .install(&bus, PluginOptions::default(), None)
        .unwrap();
    let mut manager = Manager::attach(
        &bus,
        Rc::new(ManualScheduler::new()),
        mount_props(installation.component),
    )
    .unwrap();

    manager.detach();
    installation.notifier.show("nobody listens");
    assert!(manager.is_empty());
    assert_eq!(bus.event_count(), 0);
}

#[test]
fn install_from_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
[plugin]
name = "toast"

[component]
position = "bottom-left"
width = 420
duration = 1500
"#,
    )
    .expect("Failed to write config file");

    let config = config::load_from_path(&path).expect("Failed to load config");
    let bus = EventBus::new();
    let installation = Plugin::new().install_from_config(&bus, &config).unwrap();
    assert_eq!(installation.registration_name, "toast");

    let clock = ManualScheduler::new();
    let manager = Manager::attach(
        &bus,
        Rc::new(clock.clone()),
        mount_props(installation.component),
    )
    .unwrap();
    assert_eq!(
        manager.container_style(),
        "bottom: 0; left: 0; width: 420px;"
    );

    installation.notifier.show("from config");
    clock.advance(Duration::from_millis(1500));
    assert!(manager.is_empty());
}

#[test]
fn config_with_props_and_custom_component_fails_to_install() {
    let config = Config {
        plugin: PluginOptions {
            custom_component: true,
            ..PluginOptions::default()
        },
        component: Some(ComponentProps::default()),
    };

    let err: Error = Plugin::new()
        .install_from_config(&EventBus::new(), &config)
        .unwrap_err()
        .into();
    assert_eq!(err, Error::Install(InstallError::PropsWithCustomComponent));
}

#[test]
fn config_round_trip_through_disk() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("omni").join("settings.toml");
    let config = Config {
        plugin: PluginOptions {
            component_name: "Toasts".to_string(),
            ..PluginOptions::default()
        },
        component: Some(ComponentProps {
            reverse: true,
            ignore_duplicates: true,
            ..ComponentProps::default()
        }),
    };

    config::save_to_path(&config, &path).expect("Failed to save config");
    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, config);
}
