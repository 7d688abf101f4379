//! Configuration models and loaders for the Impact Viewer.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the reference simulation service.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Top-level configuration document.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub session: SessionConfig,
    pub defaults: RequestDefaults,
}

/// Remote simulation service endpoint settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Whole-request timeout; `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Request timeout as a `Duration`, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Session store behaviour.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub stale_completions: StalePolicy,
}

/// What the session store does with a completion that belongs to a run
/// superseded by a later `start`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop completions from superseded runs.
    #[default]
    DiscardStale,
    /// Apply every completion in arrival order.
    LastWriterWins,
}

/// Parameters pre-filled into the request form.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RequestDefaults {
    pub asteroid_id: String,
    pub impact_lat: f64,
    pub impact_lon: f64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            asteroid_id: "3542519".to_string(),
            impact_lat: 28.5,
            impact_lon: -89.5,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load an application config from a `.toml` file or a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load the config at `path` when given, otherwise fall back to defaults.
pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AppConfig::default()),
    }
}
