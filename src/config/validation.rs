//! Configuration validation.
//!
//! # Responsibilities
//! - Non-empty service name
//! - Level override, when given, is a recognized level name
//! - Remote address, when given, looks like `host:port`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - No DNS lookups: reachability is only known when the transport opens

use crate::config::schema::LoggerConfig;
use crate::error::ValidationError;
use crate::logger::level::LogLevel;

/// Check a config, collecting every problem found.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    if let Some(level) = config.level.as_deref().filter(|level| !level.is_empty()) {
        if level.parse::<LogLevel>().is_err() {
            errors.push(ValidationError::InvalidLevel(level.to_string()));
        }
    }

    if !config.remote_address.is_empty() && !is_host_port(&config.remote_address) {
        errors.push(ValidationError::InvalidRemoteAddress(
            config.remote_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
