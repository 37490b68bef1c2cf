//! Activity inventory dump entry point.
//!
//! Usage: `activity-dump [CONFIG]`. Logs go to stderr; the inventory is
//! printed to stdout as JSON.

mod config;

use std::path::PathBuf;

use activity_horizon::{DeviceSnapshot, MemoryPlatform, ServiceContext};
use activity_inventory::{Inventory, InventoryBuilder};
use activity_protocol::{InventoryItem, PlatformVersion};
use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// JSON document written to stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    platform_version: PlatformVersion,
    users: usize,
    installed_count: usize,
    uninstalled_count: usize,
    items: Vec<InventoryItem>,
}

impl Report {
    fn new(platform_version: PlatformVersion, users: usize, inventory: Inventory) -> Self {
        Self {
            platform_version,
            users,
            installed_count: inventory.installed_count(),
            uninstalled_count: inventory.uninstalled_count(),
            items: inventory.into_items(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting activity inventory dump"
    );

    let config_arg = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::Config::load(config_arg.as_deref())?;

    let data = std::fs::read_to_string(&config.snapshot)
        .with_context(|| format!("failed to read snapshot {}", config.snapshot.display()))?;
    let snapshot: DeviceSnapshot = serde_json::from_str(&data)
        .with_context(|| format!("invalid snapshot {}", config.snapshot.display()))?;
    tracing::info!(
        path = %config.snapshot.display(),
        platform_version = %snapshot.platform_version,
        "snapshot loaded"
    );

    let platform = MemoryPlatform::new(snapshot);
    let sessions = platform.sessions();
    let ctx = ServiceContext::start(platform, sessions)?;
    let platform = ctx.platform();

    let builder = InventoryBuilder::from_platform(platform, config.inventory.clone())?;
    let users = if config.page_user_only {
        match builder.page_user(platform) {
            Some(user) => vec![user],
            None => {
                tracing::warn!("no page user available, inventory will be empty");
                Vec::new()
            }
        }
    } else {
        builder.users()
    };

    let inventory = builder.build_for(&users);
    let report = Report::new(platform.snapshot().platform_version, users.len(), inventory);
    println!("{}", serde_json::to_string_pretty(&report)?);

    drop(ctx);
    tracing::info!("services stopped");
    Ok(())
}
