//! Process environment variables read by the logger itself.
//!
//! Endpoint address, environment tag and service name are the caller's business; only the
//! two overrides below are read here.

/// Verbosity override: `debug`, `info`, `warn` or `error`.
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Any non-empty value suppresses local output.
pub const REMOTE_LOG_ONLY: &str = "REMOTE_LOG_ONLY";

/// Current `LOG_LEVEL`, if set to anything.
pub fn level_override() -> Option<String> {
    std::env::var(LOG_LEVEL).ok()
}

/// Whether `REMOTE_LOG_ONLY` is set to a non-empty value.
pub fn remote_log_only() -> bool {
    std::env::var_os(REMOTE_LOG_ONLY).is_some_and(|value| !value.is_empty())
}
