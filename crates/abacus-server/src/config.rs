//! Server configuration types.
//!
//! Built with [`ServerConfig::builder()`]; the `abacus` facade fills it from
//! the layered file/env configuration.
//!
//! # Example
//!
//! ```rust
//! use abacus_server::ServerConfig;
//! use std::time::Duration;
//!
//! let config = ServerConfig::builder()
//!     .http_addr("127.0.0.1:8000")
//!     .request_timeout(Duration::from_secs(5))
//!     .docs_enabled(false)
//!     .build();
//!
//! assert_eq!(config.http_addr(), "127.0.0.1:8000");
//! assert!(!config.docs_enabled());
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use abacus_docs::DEFAULT_SWAGGER_VERSION;
use abacus_extract::DEFAULT_BODY_LIMIT;

/// Default HTTP bind address.
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8000";

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default service name reported by `/health`.
pub const DEFAULT_SERVICE_NAME: &str = "abacus";

/// Default API docs title.
pub const DEFAULT_DOCS_TITLE: &str = "Abacus";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server bind address (e.g., "0.0.0.0:8000")
    http_addr: String,

    /// How long to wait for in-flight connections on shutdown
    shutdown_timeout: Duration,

    /// Upper bound on receiving a request body
    request_timeout: Duration,

    /// Largest accepted request body
    max_body_bytes: usize,

    /// Name reported by the health endpoint
    service_name: String,

    /// Whether `/openapi.json` and `/docs` are served
    docs_enabled: bool,

    docs_title: String,

    swagger_version: String,
}

impl ServerConfig {
    /// Creates a new server configuration builder.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Returns the HTTP bind address.
    #[must_use]
    pub fn http_addr(&self) -> &str {
        &self.http_addr
    }

    /// Parses and returns the HTTP address as a `SocketAddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.http_addr.parse()
    }

    /// Returns the graceful shutdown timeout.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Returns the request body timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the maximum request body size in bytes.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Returns the service name.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns whether API documentation routes are served.
    #[must_use]
    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled
    }

    /// Returns the API documentation title.
    #[must_use]
    pub fn docs_title(&self) -> &str {
        &self.docs_title
    }

    /// Returns the Swagger UI asset version.
    #[must_use]
    pub fn swagger_version(&self) -> &str {
        &self.swagger_version
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    http_addr: String,
    shutdown_timeout: Duration,
    request_timeout: Duration,
    max_body_bytes: usize,
    service_name: String,
    docs_enabled: bool,
    docs_title: String,
    swagger_version: String,
}

impl ServerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            max_body_bytes: DEFAULT_BODY_LIMIT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            docs_enabled: true,
            docs_title: DEFAULT_DOCS_TITLE.to_string(),
            swagger_version: DEFAULT_SWAGGER_VERSION.to_string(),
        }
    }

    /// Sets the HTTP bind address.
    #[must_use]
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.http_addr = addr.into();
        self
    }

    /// Sets the graceful shutdown timeout.
    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Sets the request body timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the maximum request body size.
    #[must_use]
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Enables or disables the API documentation routes.
    #[must_use]
    pub fn docs_enabled(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Sets the API documentation title.
    #[must_use]
    pub fn docs_title(mut self, title: impl Into<String>) -> Self {
        self.docs_title = title.into();
        self
    }

    /// Sets the Swagger UI asset version.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            http_addr: self.http_addr,
            shutdown_timeout: self.shutdown_timeout,
            request_timeout: self.request_timeout,
            max_body_bytes: self.max_body_bytes,
            service_name: self.service_name,
            docs_enabled: self.docs_enabled,
            docs_title: self.docs_title,
            swagger_version: self.swagger_version,
        }
    }
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
