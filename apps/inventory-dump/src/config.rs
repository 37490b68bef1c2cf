//! Dump tool configuration.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/activity-inventory/dump.toml`
//! - Windows: `%APPDATA%/activity-inventory/dump.toml`
//!
//! A path given on the command line takes precedence.

use std::path::{Path, PathBuf};

use activity_inventory::InventoryOptions;
use serde::{Deserialize, Serialize};

/// Dump tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Device snapshot (JSON) to build the inventory from.
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,

    /// Only include the page user handed over by the launching applet.
    #[serde(default)]
    pub page_user_only: bool,

    #[serde(default)]
    pub inventory: InventoryOptions,
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("device.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            page_user_only: false,
            inventory: InventoryOptions::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or the platform default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path(),
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.inventory.validate()?;

        // Relative snapshot paths are resolved against the config file.
        if config.snapshot.is_relative()
            && let Some(parent) = path.parent()
        {
            config.snapshot = parent.join(&config.snapshot);
        }

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
            .join("activity-inventory")
            .join("dump.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("activity-inventory")
            .join("dump.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_inventory::InventoryOrdering;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.snapshot, PathBuf::from("device.json"));
        assert!(!config.page_user_only);
        assert_eq!(config.inventory, InventoryOptions::default());
    }

    #[test]
    fn config_partial_toml() {
        let toml_str = r#"
page_user_only = true

[inventory]
ordering = "by-id"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.page_user_only);
        assert_eq!(config.inventory.ordering, InventoryOrdering::ById);
        assert_eq!(config.inventory.page_size, 2000);
        assert_eq!(config.snapshot, PathBuf::from("device.json"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn snapshot_resolved_relative_to_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dump.toml");
        std::fs::write(&path, "snapshot = \"switch.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.snapshot, tmp.path().join("switch.json"));
    }

    #[test]
    fn invalid_options_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dump.toml");
        std::fs::write(&path, "[inventory]\npage_size = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn config_path_not_empty() {
        assert!(config_path().to_string_lossy().contains("activity-inventory"));
    }
}
