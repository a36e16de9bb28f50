//! Error handling for configuration loading.
//!
//! Configuration problems are fatal: the run stops before any scenario is
//! read. Every variant carries enough context to point the user at the
//! offending file or key.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating a [`Config`](crate::core::config::Config)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value parsed but is not usable
    #[error("Configuration error: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a new validation error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::Invalid(msg.into())
    }
}
