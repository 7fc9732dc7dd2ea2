//! `config.toml` loading.
//!
//! Lives at `<config_dir>/taskdeck/config.toml`. A missing file yields the
//! defaults; a file that exists but does not parse is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::theme::ThemeConfig;

pub const APP_DIR_NAME: &str = "taskdeck";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// How long each access request may take before it counts as denied.
    pub access_timeout_secs: u64,
    pub log_level: String,
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            access_timeout_secs: 30,
            log_level: "info".to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn access_timeout(&self) -> Duration {
        Duration::from_secs(self.access_timeout_secs)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.access_timeout_secs == 0 {
            return Err(ConfigError::Invalid("access_timeout_secs must be > 0"));
        }
        if !matches!(
            self.log_level.trim().to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(ConfigError::Invalid(
                "log_level must be one of trace|debug|info|warn|error|off",
            ));
        }
        Ok(self)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads from the default location, falling back to defaults when there is
/// no config directory or no file.
pub fn load() -> Result<AppConfig, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(AppConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: "<inline>".to_string(),
        source,
    })?;
    config.validate()
}
