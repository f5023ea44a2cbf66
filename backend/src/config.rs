//! # Application Configuration
//!
//! Settings are read from a YAML file and then overridden by environment
//! variables. A missing or broken file is not fatal: defaults are used and a
//! warning is logged.
//!
//! ## YAML Format
//!
//! ```yaml
//! bind_addr: "127.0.0.1:3000"
//! storage: file            # or "memory"
//! data_dir: "/var/lib/sdg-explorers"
//! feedback_endpoint: "https://formspree.io/f/abc123"
//! export_dir: "/srv/exports"
//! static_dir: "./site"
//! allowed_origin: "http://localhost:8080"
//! remote_timeout_secs: 10
//! ```
//!
//! ## Environment Overrides
//!
//! `SDG_CONFIG` (config path), `SDG_BIND_ADDR`, `SDG_STORAGE`, `SDG_DATA_DIR`,
//! `SDG_FEEDBACK_ENDPOINT`, `SDG_EXPORT_DIR`, `SDG_STATIC_DIR`,
//! `SDG_ALLOWED_ORIGIN`, `SDG_REMOTE_TIMEOUT_SECS`

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "sdg-explorers.yaml";

/// Which storage medium backs the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    /// Remote form endpoint; unset or placeholder disables remote sending
    pub feedback_endpoint: Option<String>,
    /// Root of "export to path"; requests may only name folders inside it
    pub export_dir: Option<PathBuf>,
    /// Site files served for any non-API path
    pub static_dir: Option<PathBuf>,
    pub allowed_origin: String,
    pub remote_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            storage: StorageBackend::File,
            data_dir: default_data_dir(),
            feedback_endpoint: None,
            export_dir: None,
            static_dir: None,
            allowed_origin: "http://localhost:8080".to_string(),
            remote_timeout_secs: 10,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sdg-explorers")
}

impl AppConfig {
    /// Parse and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(path = ?path, "loaded configuration");
                config
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `SDG_CONFIG` (or the default file name) and apply
    /// environment overrides
    pub fn from_env() -> Self {
        let path = std::env::var("SDG_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_sources(&path, |name| std::env::var(name).ok())
    }

    /// Load `path` (defaults when unusable), then apply overrides from `lookup`
    pub fn from_sources<F>(path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_or_default(path);
        config.apply_overrides(lookup);
        config
    }

    /// Apply `SDG_*` overrides using `lookup` to read variables. An invalid
    /// value is ignored with a warning; the rest of the config is kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SDG_BIND_ADDR") {
            match value.trim().parse::<SocketAddr>() {
                Ok(_) => self.bind_addr = value.trim().to_string(),
                Err(_) => warn!(value = %value, "ignoring SDG_BIND_ADDR that is not a socket address"),
            }
        }
        if let Some(value) = lookup("SDG_STORAGE") {
            match value.trim().to_lowercase().as_str() {
                "file" => self.storage = StorageBackend::File,
                "memory" => self.storage = StorageBackend::Memory,
                other => warn!(value = other, "ignoring unknown SDG_STORAGE value"),
            }
        }
        if let Some(value) = lookup("SDG_DATA_DIR") {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SDG_FEEDBACK_ENDPOINT") {
            self.feedback_endpoint = Some(value);
        }
        if let Some(value) = lookup("SDG_EXPORT_DIR") {
            self.export_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("SDG_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("SDG_ALLOWED_ORIGIN") {
            self.allowed_origin = value;
        }
        if let Some(value) = lookup("SDG_REMOTE_TIMEOUT_SECS") {
            match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.remote_timeout_secs = secs,
                _ => warn!(value = %value, "ignoring SDG_REMOTE_TIMEOUT_SECS that is not a positive number"),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.remote_timeout_secs == 0 {
            return Err(ConfigError::Invalid("remote_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("bind_addr '{}' is not a socket address", self.bind_addr)))
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }
}
