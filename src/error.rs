//! Error types for configuration loading.
//!
//! Analysis, scoring and ranking are total and never fail; only reading an
//! [`EngineConfig`](crate::config::EngineConfig) from disk or TOML can.

use std::path::PathBuf;

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
