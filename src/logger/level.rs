//! Log levels, the environment tag, and verbosity resolution.
//!
//! # Responsibilities
//! - Closed set of levels the facade exposes (debug, info, warn, error)
//! - Map levels onto `tracing` levels and syslog severities
//! - Resolve the effective threshold from an override and the environment
//!
//! # Design Decisions
//! - Level names are matched exactly and case-sensitively
//! - An empty override counts as "not set"
//! - An unrecognized override is reported back to the caller, never fatal

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Environment tag that switches on human-readable output and debug verbosity.
pub const DEVELOPMENT: &str = "development";

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All levels, lowest severity first.
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Lowercase name, as written in JSON records and accepted from `LOG_LEVEL`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn as_tracing(&self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    /// Map a `tracing` level back onto the facade's levels. TRACE folds into debug.
    pub fn from_tracing(level: &Level) -> Self {
        if *level == Level::ERROR {
            LogLevel::Error
        } else if *level == Level::WARN {
            LogLevel::Warn
        } else if *level == Level::INFO {
            LogLevel::Info
        } else {
            LogLevel::Debug
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::from_level(level.as_tracing())
    }
}

/// Returned when a string is not one of the four level names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid log level: {0:?}")]
pub struct LevelParseError(pub String);

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LevelParseError(s.to_string()))
    }
}

/// Free-form deployment tag such as `production`, `staging` or `development`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the exact tag `development` counts.
    pub fn is_development(&self) -> bool {
        self.0 == DEVELOPMENT
    }

    /// Threshold used when no valid override is given.
    pub fn default_level(&self) -> LogLevel {
        if self.is_development() {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Environment {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Outcome of verbosity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelResolution {
    /// Effective threshold.
    pub level: LogLevel,
    /// Override value that was set but not recognized.
    pub rejected: Option<String>,
}

/// Pick the threshold: a recognized override wins, otherwise the environment default.
pub fn resolve_level(override_value: Option<&str>, environment: &Environment) -> LevelResolution {
    match override_value.filter(|value| !value.is_empty()) {
        Some(value) => match value.parse::<LogLevel>() {
            Ok(level) => LevelResolution {
                level,
                rejected: None,
            },
            Err(LevelParseError(rejected)) => LevelResolution {
                level: environment.default_level(),
                rejected: Some(rejected),
            },
        },
        None => LevelResolution {
            level: environment.default_level(),
            rejected: None,
        },
    }
}
