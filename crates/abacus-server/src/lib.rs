//! # Abacus Server
//!
//! HTTP server for the Abacus arithmetic service.
//!
//! - [`RequestService`]: routes a request and builds its response, with no
//!   network involved
//! - [`Server`]: Hyper/Tokio accept loop around a shared `RequestService`
//! - [`ShutdownSignal`] and [`ConnectionTracker`]: graceful shutdown
//! - [`HealthCheck`] and [`ReadinessCheck`]: `/health` and `/ready`
//!
//! ## Example
//!
//! ```rust,no_run
//! use abacus_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::new(ServerConfig::default())?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/abacus-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
mod health;
mod homepage;
mod router;
mod server;
mod service;
pub mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use error::ServerError;
pub use health::{HealthCheck, HealthStatus, ReadinessCheck, ReadinessStatus};
pub use homepage::{homepage, HOMEPAGE_HTML};
pub use router::{normalize_path, RouteTarget, Router};
pub use server::{HttpResponse, Server};
pub use service::{RequestService, REQUEST_ID_HEADER};
pub use shutdown::{ConnectionTracker, ConnectionToken, ShutdownSignal};
