//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The log level string is not a valid filter directive.
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel {
        /// The rejected level string.
        level: String,
        /// Why it was rejected.
        reason: String,
    },
}
