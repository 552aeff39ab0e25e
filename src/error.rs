//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port network failures are
//! not errors here: they are [`ProbeOutcome`](crate::scanner::ProbeOutcome) values.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::PortError;

/// Errors raised while building a scan request.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid port: {0}")]
    InvalidPort(#[from] PortError),

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Target host must not be empty")]
    EmptyHost,
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory")]
    DirectoryNotFound,

    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("Invalid setting {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
