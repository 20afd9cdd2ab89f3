// Logging setup.
// Routes tracing output to a log file so it never draws over the TUI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, TldrError};

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
/// Without a log file, events are discarded; the terminal belongs to the TUI.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), level)?;

    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init(),
    };

    installed.map_err(|e| TldrError::Other(format!("failed to initialize logging: {}", e)))
}

/// Filter from the `RUST_LOG` value when set, the configured level otherwise.
fn build_filter(env: Option<&str>, level: &str) -> Result<EnvFilter> {
    let directives = env.map(str::trim).filter(|d| !d.is_empty()).unwrap_or(level);
    EnvFilter::try_new(directives)
        .map_err(|e| TldrError::Config(format!("invalid log level '{}': {}", directives, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_configured_level() {
        let filter = build_filter(Some("tldr=trace"), "info").unwrap();
        assert_eq!(filter.to_string(), "tldr=trace");
    }

    #[test]
    fn test_configured_level_without_env() {
        assert_eq!(build_filter(None, "debug").unwrap().to_string(), "debug");
        assert_eq!(build_filter(Some("  "), "warn").unwrap().to_string(), "warn");
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let err = build_filter(None, "tldr=loud").unwrap_err();
        assert!(matches!(err, TldrError::Config(_)));
    }
}
