//! The top-level [`AbacusConfig`].

use std::net::SocketAddr;

use abacus_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, DocsConfig, LogFormat, LoggingConfig, ServerConfig};

/// Complete Abacus configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use abacus_config::AbacusConfig;
///
/// let config = AbacusConfig::default();
/// assert_eq!(config.server.http_addr, "0.0.0.0:8000");
/// assert!(config.docs.enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct AbacusConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// API documentation configuration.
    #[serde(default)]
    pub docs: DocsConfig,
}

impl AbacusConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `server.http_addr` is not a socket address
    /// - a timeout or the body limit is zero
    /// - `server.service_name` is empty
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.http_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        let non_zero = [
            ("server.shutdown_timeout_secs", self.server.shutdown_timeout_secs),
            ("server.request_timeout_ms", self.server.request_timeout_ms),
            ("server.max_body_bytes", self.server.max_body_bytes as u64),
        ];
        if let Some((field, _)) = non_zero.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::invalid_value(*field, "must be greater than zero"));
        }

        if self.server.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "server.service_name",
                "must not be empty",
            ));
        }

        if self.logging.enabled {
            abacus_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Development preset: debug level, pretty output with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use abacus_config::{AbacusConfig, LogFormat};
    ///
    /// let config = AbacusConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.server.http_addr = "127.0.0.1:8000".to_string();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Production preset: info level, JSON output.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }

    /// Returns the logging setup for this configuration.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.logging.enabled,
            level: self.logging.level.clone(),
            json_format: self.logging.format == LogFormat::Json,
            file_line_info: self.logging.include_location,
            include_target: true,
            service_name: self.server.service_name.clone(),
        }
    }
}
