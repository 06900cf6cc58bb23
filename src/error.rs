//! Error types.
//!
//! None of these reach callers of the logging methods: remote setup failures are logged
//! locally and swallowed, validation and config errors only surface to code that asks.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to open the remote syslog transport.
#[derive(Debug, Error)]
pub enum RemoteSetupError {
    /// Address could not be parsed or looked up.
    #[error("failed to resolve remote log address {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Lookup succeeded but returned nothing.
    #[error("remote log address {0} resolved to no socket address")]
    NoAddress(String),

    /// Local socket could not be opened.
    #[error("failed to open syslog transport to {address}: {reason}")]
    Transport { address: String, reason: String },
}

/// Semantic problem in a [`LoggerConfig`](crate::config::LoggerConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service_name must not be empty")]
    EmptyServiceName,

    #[error("level {0:?} is not one of debug, info, warn, error")]
    InvalidLevel(String),

    #[error("remote_address {0:?} must be of the form host:port")]
    InvalidRemoteAddress(String),
}

/// Error reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
