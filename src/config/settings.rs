//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG config directory
//! (`~/.config/portsweep` on Linux). Every field is optional in the file.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PROBE_TIMEOUT, DEFAULT_WORKERS};
use crate::types::Port;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform configuration directory.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portsweep", "portsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide scan defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default worker count.
    pub default_threads: u32,
    pub default_start_port: u16,
    pub default_end_port: u16,
    /// Per-attempt connect timeout in milliseconds.
    pub timeout_ms: u64,
    /// Probe attempts per port for refused or timed-out connections.
    pub max_retries: u32,
    /// Enable verbose output by default.
    pub verbose: bool,
    /// Default output format ("plain", "json" or "csv").
    pub default_output_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_threads: DEFAULT_WORKERS,
            default_start_port: Port::MIN,
            default_end_port: Port::MAX,
            timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
            max_retries: DEFAULT_MAX_ATTEMPTS,
            verbose: false,
            default_output_format: "plain".to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults when
    /// no settings file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Reject values no scan could run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "default_threads",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.default_start_port == 0 || self.default_end_port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "default_start_port",
                reason: "ports must be between 1 and 65535".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_retries",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
