//! # Service Configuration
//!
//! Loaded from YAML. Every field has a default, so an empty document is a
//! valid configuration: no qualifiers supported, no completeness checking,
//! request logging on, text logs at `info`.
//!
//! ```yaml
//! supported_qualifiers: [checksum.sri, resource_type]
//! completeness_checking:
//!   batch_size: 1000
//!   maximum_message_size_bytes: 16777216
//!   max_refetches: 0
//! logging: true
//! log:
//!   format: json
//!   filter: "info,ahub_cas=debug"
//! ```

use std::path::{Path, PathBuf};

use ahub_core::QualifierSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config field {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("failed to initialise logging: {reason}")]
    Telemetry { reason: String },
}

/// Top-level configuration for the fetch and push services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Qualifier names accepted on fetch and push requests.
    #[serde(default)]
    pub supported_qualifiers: Vec<String>,
    /// Verify resolved content against the CAS. Absent disables checking.
    #[serde(default)]
    pub completeness_checking: Option<CompletenessConfig>,
    /// Log every request and its outcome.
    #[serde(default = "default_logging")]
    pub logging: bool,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessConfig {
    /// Digests per FindMissing query.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Largest Tree object that will be read.
    #[serde(default = "default_maximum_message_size_bytes")]
    pub maximum_message_size_bytes: usize,
    /// Refetches allowed per call when the policy asks for one.
    #[serde(default)]
    pub max_refetches: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directives. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_logging() -> bool {
    true
}

fn default_batch_size() -> usize {
    1000
}

fn default_maximum_message_size_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            supported_qualifiers: Vec::new(),
            completeness_checking: None,
            logging: default_logging(),
            log: LogConfig::default(),
        }
    }
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            maximum_message_size_bytes: default_maximum_message_size_bytes(),
            max_refetches: 0,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

impl HubConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(completeness) = &self.completeness_checking {
            completeness.validate()?;
        }
        if let Some(name) = self.supported_qualifiers.iter().find(|n| n.is_empty()) {
            return Err(ConfigError::Invalid {
                field: "supported_qualifiers".into(),
                reason: format!("qualifier names must be non-empty, got {name:?}"),
            });
        }
        Ok(())
    }

    pub fn supported_qualifier_set(&self) -> QualifierSet {
        QualifierSet::new(self.supported_qualifiers.iter().cloned())
    }
}

impl CompletenessConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "completeness_checking.batch_size".into(),
                reason: "must be positive".into(),
            });
        }
        if self.maximum_message_size_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "completeness_checking.maximum_message_size_bytes".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}
