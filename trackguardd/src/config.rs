use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use trackguard_common::tracing::{self, debug, Level};
use trackguard_common::DaemonError;

/// Delay between two poll ticks
pub const POLL_INTERVAL_MS: u64 = 200;

/// Time without trackpoint motion before the touchpad is re-enabled
pub const QUIESCENCE_MS: u64 = 10_000;

/// Boolean property used to switch the touchpad on and off
pub const DEVICE_ENABLED_PROPERTY: &str = "Device Enabled";

/// Case-sensitive substring identifying the trackpoint among pointer devices
pub const TRACKPOINT_NAME_PATTERN: &str = "TrackPoint";

/// Location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/trackguard/config.yaml";

/// Daemon configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    pub daemon: DaemonSettings,
}

/// Daemon-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonSettings {
    /// X display to connect to; `DISPLAY` is used when unset
    pub display: Option<String>,
    pub log_level: String,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            display: None,
            log_level: "info".to_string(),
        }
    }
}

impl DaemonSettings {
    /// Maximum tracing level for the subscriber
    pub fn max_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

/// Read-only configuration loader
pub struct ConfigManager {
    pub config_path: PathBuf,
    pub config: DaemonConfig,
    pub loaded_from_disk: bool,
}

impl ConfigManager {
    /// Create a configuration manager for the default path
    pub fn new() -> Self {
        Self::with_path(DEFAULT_CONFIG_PATH)
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            config: DaemonConfig::default(),
            loaded_from_disk: false,
        }
    }

    /// Load configuration from disk, keeping defaults if the file is absent
    pub async fn load_config(&mut self) -> Result<(), DaemonError> {
        if !self.config_path.exists() {
            debug!("No configuration at {}, using defaults", self.config_path.display());
            return Ok(());
        }

        let content = fs::read_to_string(&self.config_path).await.map_err(|e| {
            DaemonError::Config(format!("failed to read {}: {}", self.config_path.display(), e))
        })?;
        let config: DaemonConfig = serde_yaml::from_str(&content).map_err(|e| {
            DaemonError::Config(format!("failed to parse {}: {}", self.config_path.display(), e))
        })?;

        if config.daemon.log_level.parse::<tracing::Level>().is_err() {
            return Err(DaemonError::Config(format!(
                "invalid log_level '{}'",
                config.daemon.log_level
            )));
        }

        self.config = config;
        self.loaded_from_disk = true;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
