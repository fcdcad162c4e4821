//! # Log Output
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` overrides the
//! configured filter when set.

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, LogConfig, LogFormat};

/// Build the filter for `config`, preferring `RUST_LOG`.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| ConfigError::Invalid {
        field: "log.filter".into(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<(), ConfigError> {
    let filter = env_filter(config)?;
    let installed = match config.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_current_span(false)
            .with_env_filter(filter)
            .try_init(),
    };
    installed.map_err(|e| ConfigError::Telemetry {
        reason: e.to_string(),
    })
}
