//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Settings for one service's Logger.
///
/// ```toml
/// service_name = "billing"
/// environment = "production"
/// remote_address = "logs.example.com:514"
/// level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Service name attached to every record as `app`.
    pub service_name: String,

    /// Syslog endpoint (`host:port`). Empty disables remote logging.
    pub remote_address: String,

    /// Deployment tag (`development`, `staging`, `production`, ...).
    pub environment: String,

    /// Level override. Falls back to `LOG_LEVEL`, then to the environment default.
    pub level: Option<String>,

    /// Pin remote-only mode. Unset means `REMOTE_LOG_ONLY` is read at every call.
    pub remote_log_only: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: LoggerConfig = toml::from_str(r#"service_name = "billing""#).unwrap();
        assert_eq!(config.service_name, "billing");
        assert!(config.remote_address.is_empty());
        assert!(config.environment.is_empty());
        assert_eq!(config.level, None);
        assert_eq!(config.remote_log_only, None);
    }

    #[test]
    fn full_config() {
        let config: LoggerConfig = toml::from_str(
            r#"
            service_name = "billing"
            environment = "production"
            remote_address = "logs.example.com:514"
            level = "warn"
            remote_log_only = true
            "#,
        )
        .unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(config.remote_address, "logs.example.com:514");
        assert_eq!(config.level.as_deref(), Some("warn"));
        assert_eq!(config.remote_log_only, Some(true));
    }

    #[test]
    fn nested_in_host_config() {
        #[derive(Deserialize)]
        struct HostConfig {
            logging: LoggerConfig,
        }

        let host: HostConfig = toml::from_str(
            r#"
            [logging]
            service_name = "search"
            environment = "development"
            "#,
        )
        .unwrap();
        assert_eq!(host.logging.service_name, "search");
        assert_eq!(host.logging.environment, "development");
    }
}
