//! Error types for configuration loading.
//!
//! The analysis engine itself never fails; only reading configuration from
//! disk can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an [`AnalysisConfig`](crate::AnalysisConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
