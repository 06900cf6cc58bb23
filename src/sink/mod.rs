//! Output sinks.
//!
//! # Data Flow
//! ```text
//! LogEvent
//!     → Sink::emit (enters the sink's own tracing dispatcher)
//!     → tracing event with fields app / error / meta / message
//!     → per-sink LevelFilter
//!     → formatting layer (json.rs or tracing-subscriber fmt)
//!     → MakeWriter (stdout, stderr, syslog.rs)
//! ```
//!
//! # Design Decisions
//! - Each sink owns a `tracing::Dispatch`; no global subscriber is installed
//! - The verbosity threshold lives in the sink, so Loggers do not interfere with each other
//! - Write failures are swallowed inside the layers

pub mod json;
pub mod syslog;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use crate::logger::event::LogEvent;
use crate::logger::level::LogLevel;

pub use self::json::JsonLayer;
pub use self::syslog::SyslogMakeWriter;

/// Target for every event emitted by the facade.
pub const TARGET: &str = "service_logger";

/// How a sink renders records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable line, optionally colorized.
    Console { ansi: bool },
}

/// A formatting pipeline with its own threshold and destination.
#[derive(Debug, Clone)]
pub struct Sink {
    service: String,
    level: LogLevel,
    format: SinkFormat,
    dispatch: Dispatch,
}

impl Sink {
    pub fn new<W>(service: &str, level: LogLevel, format: SinkFormat, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let filter = LevelFilter::from(level);
        let dispatch = match format {
            SinkFormat::Json => Dispatch::new(
                tracing_subscriber::registry().with(JsonLayer::new(writer).with_filter(filter)),
            ),
            SinkFormat::Console { ansi } => {
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false);
                Dispatch::new(tracing_subscriber::registry().with(layer.with_filter(filter)))
            }
        };

        Self {
            service: service.to_string(),
            level,
            format,
            dispatch,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn format(&self) -> SinkFormat {
        self.format
    }

    /// Render one event. Never fails.
    pub fn emit(&self, event: &LogEvent<'_>) {
        tracing::dispatcher::with_default(&self.dispatch, || record(&self.service, event));
    }
}

fn record(app: &str, event: &LogEvent<'_>) {
    let meta = event.meta_json().map(tracing::field::display);
    let message = event.message;

    match event.level {
        LogLevel::Debug => {
            tracing::debug!(target: TARGET, app = %app, meta, "{message}");
        }
        LogLevel::Info => {
            tracing::info!(target: TARGET, app = %app, meta, "{message}");
        }
        LogLevel::Warn => {
            tracing::warn!(target: TARGET, app = %app, meta, "{message}");
        }
        LogLevel::Error => {
            let error = event.error;
            tracing::error!(target: TARGET, app = %app, error, meta, "{message}");
        }
    }
}
