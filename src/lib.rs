//! Logging facade for backend services.
//!
//! # Architecture Overview
//!
//! ```text
//!   logger.info("hello", Some(&meta))
//!            │
//!            ▼
//!   ┌─────────────────┐   REMOTE_LOG_ONLY unset   ┌──────────────┐
//!   │     Logger      │──────────────────────────▶│  local sink  │──▶ stdout (JSON)
//!   │   (dispatch)    │                           │              │──▶ stderr (development)
//!   │                 │   remote configured       ├──────────────┤
//!   │                 │──────────────────────────▶│ remote sink  │──▶ syslog / UDP
//!   └─────────────────┘                           └──────────────┘
//! ```
//!
//! ```no_run
//! use service_logger::{configure, meta};
//!
//! let logger = configure("billing", "", "production");
//! logger.info("invoice sent", Some(&meta! { "invoice_id" => 1042 }));
//! logger.error("charge failed", None, None);
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod sink;

pub use config::LoggerConfig;
pub use error::{ConfigError, RemoteSetupError, ValidationError};
pub use logger::event::{LogEvent, Meta};
pub use logger::level::{Environment, LogLevel};
pub use logger::{configure, Logger, LoggerBuilder};

#[doc(hidden)]
pub use serde_json;
