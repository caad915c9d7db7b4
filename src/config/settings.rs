//! Probe settings and paths.
//!
//! Settings live in an XDG-compliant config directory as `settings.json`.
//! A missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::types::PortRange;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portprobe)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the configuration directory. Nothing is created.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portprobe", "portprobe")
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

/// Probe timing and the default port range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Connect timeout per probe in milliseconds.
    pub timeout_ms: u64,
    /// First port probed.
    pub start_port: u16,
    /// First port not probed.
    pub end_port: u16,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            start_port: 50,
            end_port: 85,
        }
    }
}

impl ProbeSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::new()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Apply command-line overrides field by field.
    pub fn merge(
        mut self,
        timeout_ms: Option<u64>,
        start_port: Option<u16>,
        end_port: Option<u16>,
    ) -> Self {
        if let Some(timeout_ms) = timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(start_port) = start_port {
            self.start_port = start_port;
        }
        if let Some(end_port) = end_port {
            self.end_port = end_port;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        self.port_range()
            .map(|_| ())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn port_range(&self) -> Result<PortRange, crate::types::PortError> {
        PortRange::from_bounds(self.start_port, self.end_port)
    }
}
