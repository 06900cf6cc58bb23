//! Logger construction.

use std::fmt;
use std::io::Write;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{env, LoggerConfig};
use crate::logger::event::LogEvent;
use crate::logger::level::{resolve_level, Environment, LogLevel};
use crate::logger::Logger;
use crate::sink::{Sink, SinkFormat, SyslogMakeWriter};

/// Build a Logger for `service_name`.
///
/// `remote_address` is a `host:port` syslog endpoint, or empty for local-only logging.
/// `environment` is a free-form tag; `development` switches to human-readable output on
/// stderr and a debug threshold. `LOG_LEVEL` and `REMOTE_LOG_ONLY` are honored.
///
/// Never fails: an unreachable remote endpoint is reported through the local sink and the
/// Logger carries on without it.
pub fn configure(service_name: &str, remote_address: &str, environment: &str) -> Logger {
    LoggerBuilder::new(service_name)
        .remote_address(remote_address)
        .environment(environment)
        .with_process_env()
        .build()
}

/// Step-by-step Logger construction.
///
/// Defaults: no remote endpoint, empty environment tag, no level override, remote-only mode
/// read from the process environment at each call, ANSI colors on, real stdout/stderr.
pub struct LoggerBuilder {
    service: String,
    remote_address: String,
    environment: Environment,
    level_override: Option<String>,
    remote_log_only: Option<bool>,
    ansi: bool,
    stdout: BoxMakeWriter,
    stderr: BoxMakeWriter,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("service", &self.service)
            .field("remote_address", &self.remote_address)
            .field("environment", &self.environment)
            .field("level_override", &self.level_override)
            .field("remote_log_only", &self.remote_log_only)
            .field("ansi", &self.ansi)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service: service_name.into(),
            remote_address: String::new(),
            environment: Environment::default(),
            level_override: None,
            remote_log_only: None,
            ansi: true,
            stdout: BoxMakeWriter::new(std::io::stdout),
            stderr: BoxMakeWriter::new(std::io::stderr),
        }
    }

    /// Start from a deserialized config. A missing `level` falls back to `LOG_LEVEL`.
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut builder = Self::new(config.service_name.as_str())
            .remote_address(config.remote_address.as_str())
            .environment(config.environment.as_str());
        builder.level_override = config.level.clone().or_else(env::level_override);
        builder.remote_log_only = config.remote_log_only;
        builder
    }

    /// Syslog endpoint as `host:port`. Empty disables remote logging.
    pub fn remote_address(mut self, address: impl Into<String>) -> Self {
        self.remote_address = address.into();
        self
    }

    pub fn environment(mut self, environment: impl Into<Environment>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Level override, as if read from `LOG_LEVEL`. Unrecognized values are reported on the
    /// console and ignored.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level_override = Some(level.into());
        self
    }

    /// Read `LOG_LEVEL` now; `REMOTE_LOG_ONLY` keeps being read at every call.
    pub fn with_process_env(mut self) -> Self {
        self.level_override = env::level_override();
        self
    }

    /// Pin remote-only mode instead of reading `REMOTE_LOG_ONLY` at every call.
    pub fn remote_log_only(mut self, enabled: bool) -> Self {
        self.remote_log_only = Some(enabled);
        self
    }

    /// Colorize human-readable local output.
    pub fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Destination for JSON output. Defaults to standard output.
    pub fn stdout<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.stdout = BoxMakeWriter::new(writer);
        self
    }

    /// Destination for human-readable output and console warnings. Defaults to standard error.
    pub fn stderr<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.stderr = BoxMakeWriter::new(writer);
        self
    }

    pub fn build(self) -> Logger {
        let LoggerBuilder {
            service,
            remote_address,
            environment,
            level_override,
            remote_log_only,
            ansi,
            stdout,
            stderr,
        } = self;

        let resolution = resolve_level(level_override.as_deref(), &environment);
        if let Some(rejected) = &resolution.rejected {
            let mut console = stderr.make_writer();
            let _ = writeln!(console, "Invalid log level specified: {rejected}");
        }
        let level = resolution.level;
        let development = environment.is_development();

        let local = if development {
            Sink::new(&service, level, SinkFormat::Console { ansi }, stderr)
        } else {
            Sink::new(&service, level, SinkFormat::Json, stdout)
        };

        let startup = format!("Setting up logger for {service} in {environment} environment");
        local.emit(&LogEvent::new(LogLevel::Debug, &startup, None));

        let remote = if remote_address.is_empty() {
            None
        } else {
            let tag = format!("{service}-{environment}");
            match SyslogMakeWriter::connect(&remote_address, &tag) {
                Ok(writer) => {
                    let format = if development {
                        SinkFormat::Console { ansi: false }
                    } else {
                        SinkFormat::Json
                    };
                    Some(Sink::new(&service, level, format, writer))
                }
                Err(err) => {
                    let cause: &(dyn std::error::Error + 'static) = &err;
                    local.emit(&LogEvent::error(
                        "Failed to set up remote logger!",
                        Some(cause),
                        None,
                    ));
                    None
                }
            }
        };

        Logger {
            service,
            environment,
            local,
            remote,
            remote_log_only,
        }
    }
}
