//! Logger configuration.
//!
//! # Data Flow
//! ```text
//! host application config (TOML/YAML/env, owned by the caller)
//!     → schema.rs (LoggerConfig, serde)
//!     → validation.rs (semantic checks, optional)
//!     → LoggerBuilder::from_config
//!     → Logger (immutable)
//! ```
//!
//! # Design Decisions
//! - The logger never reads config files; callers embed `LoggerConfig` in their own
//! - All fields have defaults to allow minimal configs
//! - Validation is advisory: building a Logger from an invalid config still succeeds

pub mod env;
pub mod schema;
pub mod validation;

pub use schema::LoggerConfig;
pub use validation::validate_config;
