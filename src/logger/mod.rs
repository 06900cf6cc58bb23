//! Logger facade.
//!
//! # Responsibilities
//! - Public `debug` / `info` / `warn` / `error` entry points
//! - Fan each call out to the local sink and, when configured, the remote sink
//! - Honor remote-only mode (`REMOTE_LOG_ONLY`) by skipping local output
//!
//! # Design Decisions
//! - Logging never fails and never panics on sink errors
//! - The two sinks are independent optional slots, not a polymorphic list
//! - Immutable after construction; share it by reference or `Arc`

pub mod builder;
pub mod event;
pub mod level;

use std::error::Error;

use crate::config::env;
use crate::sink::Sink;

use self::event::{LogEvent, Meta};
use self::level::{Environment, LogLevel};

pub use self::builder::{configure, LoggerBuilder};

/// Dual-sink logger for one service.
#[derive(Debug, Clone)]
pub struct Logger {
    service: String,
    environment: Environment,
    local: Sink,
    remote: Option<Sink>,
    /// `None` consults the process environment on every call.
    remote_log_only: Option<bool>,
}

impl Logger {
    pub fn debug(&self, message: &str, meta: Option<&Meta>) {
        self.dispatch(LogEvent::new(LogLevel::Debug, message, meta));
    }

    pub fn info(&self, message: &str, meta: Option<&Meta>) {
        self.dispatch(LogEvent::new(LogLevel::Info, message, meta));
    }

    pub fn warn(&self, message: &str, meta: Option<&Meta>) {
        self.dispatch(LogEvent::new(LogLevel::Warn, message, meta));
    }

    /// Log at error level. `err` goes to the dedicated `error` field, separate from `meta`.
    pub fn error(&self, message: &str, err: Option<&(dyn Error + 'static)>, meta: Option<&Meta>) {
        self.dispatch(LogEvent::error(message, err, meta));
    }

    /// Emit an already-built event.
    pub fn log(&self, event: &LogEvent<'_>) {
        self.dispatch(*event);
    }

    fn dispatch(&self, event: LogEvent<'_>) {
        if !self.remote_log_only() {
            self.local.emit(&event);
        }

        if let Some(remote) = &self.remote {
            remote.emit(&event);
        }
    }

    fn remote_log_only(&self) -> bool {
        self.remote_log_only.unwrap_or_else(env::remote_log_only)
    }

    pub fn service_name(&self) -> &str {
        &self.service
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Effective verbosity threshold.
    pub fn level(&self) -> LogLevel {
        self.local.level()
    }

    /// True once the remote transport has been opened successfully.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local_sink(&self) -> &Sink {
        &self.local
    }

    pub fn remote_sink(&self) -> Option<&Sink> {
        self.remote.as_ref()
    }
}
