//! # Abacus
//!
//! **A small HTTP arithmetic service.**
//!
//! | Route | Method | Body | Response |
//! |-------|--------|------|----------|
//! | `/` | GET | | HTML homepage |
//! | `/add`, `/subtract`, `/multiply` | POST | `{"a": n, "b": n}` | `{"result": n}` |
//! | `/divide` | POST | `{"a": n, "b": n}` | `{"result": n}` or 400 `{"error": "Cannot divide by zero!"}` |
//! | `/openapi.json`, `/docs` | GET | | API documentation |
//! | `/health`, `/ready` | GET | | probes |
//!
//! Malformed bodies get a 422 with a `detail` array describing the first
//! problem found.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use abacus::ConfigSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = abacus::load_config(&ConfigSource::resolve(None))?;
//!     abacus::build_server(&config)?.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! ```text
//! abacus-core ← abacus-extract ← abacus-server ← abacus
//!      ↑                              ↑            ↑
//!  abacus-docs ───────────────────────┘   abacus-config → abacus-telemetry
//! ```

#![doc(html_root_url = "https://docs.rs/abacus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub use abacus_config as config;
pub use abacus_core as core;
pub use abacus_docs as docs;
pub use abacus_extract as extract;
pub use abacus_server as server;
pub use abacus_telemetry as telemetry;

use abacus_config::{AbacusConfig, ConfigError, ConfigLoader};
use abacus_server::{RequestService, Server, ServerConfig, ServerError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "ABACUS_CONFIG";

/// Configuration file picked up from the working directory when no path is
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "abacus.toml";

/// Prefix for `ABACUS__SECTION__KEY` environment overrides.
pub const ENV_PREFIX: &str = "ABACUS";

/// Where the configuration file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line or in `ABACUS_CONFIG`; must exist.
    Explicit(PathBuf),
    /// The default file; used only if present.
    Default(PathBuf),
}

impl ConfigSource {
    /// Resolves the source from a command-line argument, falling back to
    /// `ABACUS_CONFIG` and then to `abacus.toml`.
    #[must_use]
    pub fn resolve(arg: Option<PathBuf>) -> Self {
        Self::from_parts(arg, std::env::var_os(CONFIG_ENV_VAR))
    }

    /// Like [`resolve`](Self::resolve), with the environment value passed in.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::ConfigSource;
    /// use std::path::PathBuf;
    ///
    /// let source = ConfigSource::from_parts(None, Some("/etc/abacus.json".into()));
    /// assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/etc/abacus.json")));
    ///
    /// let source = ConfigSource::from_parts(None, Some("".into()));
    /// assert_eq!(source, ConfigSource::Default(PathBuf::from("abacus.toml")));
    /// ```
    #[must_use]
    pub fn from_parts(arg: Option<PathBuf>, env: Option<OsString>) -> Self {
        arg.or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
            .map_or_else(
                || Self::Default(PathBuf::from(DEFAULT_CONFIG_FILE)),
                Self::Explicit,
            )
    }
}

/// Loads configuration: defaults, then `.env`, then the file, then
/// `ABACUS__*` overrides, then validation.
///
/// # Errors
///
/// Returns a [`ConfigError`] if an explicit file is missing, any layer fails
/// to parse, or the result is invalid.
pub fn load_config(source: &ConfigSource) -> Result<AbacusConfig, ConfigError> {
    let loader = ConfigLoader::new().with_defaults().with_dotenv()?;
    let loader = match source {
        ConfigSource::Explicit(path) => loader.with_file(path)?,
        ConfigSource::Default(path) => loader.with_optional_file(path)?,
    };
    loader.with_env_prefix(ENV_PREFIX).load()
}

/// Maps the file/env configuration onto the server's settings.
#[must_use]
pub fn server_config(config: &AbacusConfig) -> ServerConfig {
    ServerConfig::builder()
        .http_addr(&config.server.http_addr)
        .shutdown_timeout(Duration::from_secs(config.server.shutdown_timeout_secs))
        .request_timeout(Duration::from_millis(config.server.request_timeout_ms))
        .max_body_bytes(config.server.max_body_bytes)
        .service_name(&config.server.service_name)
        .docs_enabled(config.docs.enabled)
        .docs_title(&config.docs.title)
        .swagger_version(&config.docs.swagger_version)
        .build()
}

/// Builds the request service for `config`.
///
/// # Errors
///
/// Returns an error if the API docs cannot be rendered.
///
/// # Example
///
/// ```rust
/// use abacus::config::AbacusConfig;
///
/// let service = abacus::build_service(&AbacusConfig::default()).unwrap();
/// assert!(service.readiness().is_ready());
/// ```
pub fn build_service(config: &AbacusConfig) -> Result<Arc<RequestService>, ServerError> {
    RequestService::new(&server_config(config)).map(Arc::new)
}

/// Builds the HTTP server for `config`.
///
/// # Errors
///
/// Returns an error if the API docs cannot be rendered.
pub fn build_server(config: &AbacusConfig) -> Result<Server, ServerError> {
    Server::new(server_config(config))
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use abacus_config::{AbacusConfig, ConfigLoader};
    pub use abacus_core::{
        ApiError, ApiResult, DomainError, Number, Operation, OperationRequest, OperationResult,
        ValidationError,
    };
    pub use abacus_server::{RequestService, Server, ServerConfig, ShutdownSignal};
}
