// SPDX-License-Identifier: MPL-2.0
use omni_notify::config::{self, ComponentProps};
use omni_notify::error::{Error, Result};
use omni_notify::event_bus::EventBus;
use omni_notify::notifications::{ComponentRegistration, Manager, NotificationType, Plugin};
use omni_notify::timer::TokioScheduler;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const STICKY_GRACE: Duration = Duration::from_secs(5);

const SAMPLE_MESSAGES: [&str; 4] = [
    "Settings saved",
    "Sync finished",
    "Disk almost full",
    "Upload failed",
];

struct Flags {
    config_path: Option<PathBuf>,
    position: Option<String>,
    duration: Option<i64>,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let config_path = args
        .opt_value_from_str("--config")
        .map_err(|e| Error::Config(e.to_string()))?;
    let position = args
        .opt_value_from_str("--position")
        .map_err(|e| Error::Config(e.to_string()))?;
    let duration = args
        .opt_value_from_str("--duration")
        .map_err(|e| Error::Config(e.to_string()))?;
    let messages = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();

    Ok(Flags {
        config_path,
        position,
        duration,
        messages,
    })
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let Flags {
        config_path,
        position,
        duration,
        messages,
    } = parse_flags()?;

    let config = match &config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let bus = EventBus::new();
    let installation = Plugin::new().install_from_config(&bus, &config)?;
    let notifier = installation.notifier;
    let mut props = match installation.component {
        ComponentRegistration::Mount { props, .. } => props,
        ComponentRegistration::Register { component_name } => {
            tracing::info!(component = %component_name, "host renders its own component, using default props");
            ComponentProps::default()
        }
    };
    if let Some(position) = position {
        props.position = position;
    }
    if let Some(duration) = duration {
        props.duration = duration;
    }
    let sticky = props.duration < 0;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async move {
        let scheduler = Rc::new(TokioScheduler::new());
        let manager = Manager::attach(&bus, scheduler, props)?;
        tracing::info!(style = %manager.container_style(), "container");

        let messages: Vec<String> = if messages.is_empty() {
            SAMPLE_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            messages
        };
        let kinds = [
            NotificationType::Success,
            NotificationType::Info,
            NotificationType::Warning,
            NotificationType::Error,
        ];
        for (message, kind) in messages.into_iter().zip(kinds.into_iter().cycle()) {
            let id = notifier.notify(message.as_str(), Some(kind));
            tracing::info!(id, kind = kind.as_str(), %message, "notified");
        }

        if sticky {
            tracing::warn!(
                grace_secs = STICKY_GRACE.as_secs(),
                "negative duration keeps toasts open, clearing after grace period"
            );
            tokio::time::sleep(STICKY_GRACE).await;
            notifier.clear_all();
        }

        let mut shown = manager.visible_ids();
        while !manager.is_empty() {
            tokio::time::sleep(POLL_INTERVAL).await;
            let now = manager.visible_ids();
            for id in shown.iter().filter(|id| !now.contains(*id)) {
                tracing::info!(id, "dismissed");
            }
            shown = now;
        }
        for id in &shown {
            tracing::info!(id, "dismissed");
        }
        Ok::<(), Error>(())
    })
}
