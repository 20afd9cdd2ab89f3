// Application configuration.
// Loaded from config.toml; command-line flags override individual values.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TldrError};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the tldr API server.
    pub api_url: String,
    /// Default tracing filter, e.g. `info` or `tldr=debug`.
    pub log_level: String,
    /// How long a cached repo list is shown before it is considered stale.
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: "info".to_string(),
            cache_ttl_secs: 5 * 60,
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TldrError::Config(e.to_string()))
    }

    /// Load `path`, or the default config location when `path` is `None`.
    /// An explicitly named file must exist; a missing default file yields
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match crate::cache::paths::config_path() {
                Some(default) if default.exists() => Self::read(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TldrError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
