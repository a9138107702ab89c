//! Typed configuration for Abacus.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use abacus_config::ConfigLoader;
//!
//! # fn main() -> Result<(), abacus_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("abacus.toml")?
//!     .with_env_prefix("ABACUS")
//!     .load()?;
//!
//! println!("Listening on: {}", config.server.http_addr);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8000"
//! shutdown_timeout_secs = 30
//! request_timeout_ms = 30000
//! max_body_bytes = 1048576
//! service_name = "abacus"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//!
//! [docs]
//! enabled = true
//! title = "Abacus"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `ABACUS__SERVER__HTTP_ADDR=127.0.0.1:9000`
//! - `ABACUS__LOGGING__LEVEL=debug`
//! - `ABACUS__DOCS__ENABLED=false`

#![doc(html_root_url = "https://docs.rs/abacus-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::AbacusConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{DocsConfig, LogFormat, LoggingConfig, ServerConfig};
