//! Error types for session configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a [`SessionConfig`](super::SessionConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse session configuration")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
