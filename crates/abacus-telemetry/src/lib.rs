//! Structured logging for Abacus.
//!
//! Every request served by `abacus-server` produces one `info` line with the
//! method, path, status, request id and latency. This crate sets up the
//! subscriber those lines go to.
//!
//! # Example
//!
//! ```rust,ignore
//! use abacus_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! ```

#![doc(html_root_url = "https://docs.rs/abacus-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
