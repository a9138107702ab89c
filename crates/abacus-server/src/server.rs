//! HTTP server built on Hyper and Tokio.
//!
//! The accept loop spawns one task per connection and serves HTTP/1.1 on it
//! through the shared [`RequestService`]. On shutdown the loop stops
//! accepting, readiness flips to `false`, open connections are asked to
//! finish their current request, and the server waits for them up to the
//! configured shutdown timeout.
//!
//! # Example
//!
//! ```rust,no_run
//! use abacus_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::builder()
//!         .http_addr("127.0.0.1:8000")
//!         .build();
//!
//!     Server::new(config)?.run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::service::RequestService;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Type alias for the HTTP response sent on the wire.
pub type HttpResponse = Response<Full<Bytes>>;

/// The Abacus HTTP server.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    service: Arc<RequestService>,
}

impl Server {
    /// Creates a server and its request service from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API docs cannot be rendered.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let service = RequestService::new(&config)?;
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Creates a server around an existing request service.
    #[must_use]
    pub fn with_service(config: ServerConfig, service: Arc<RequestService>) -> Self {
        Self { config, service }
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the shared request service.
    #[must_use]
    pub fn service(&self) -> &Arc<RequestService> {
        &self.service
    }

    /// Runs the server until SIGTERM or SIGINT.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address is invalid or cannot be
    /// bound.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Binds the configured address and runs until `shutdown` fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address is invalid or cannot be
    /// bound.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::BindError { addr, source })?;

        self.serve(listener, shutdown).await;
        Ok(())
    }

    /// Serves connections from an already-bound listener until `shutdown`
    /// fires, then drains.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) {
        match listener.local_addr() {
            Ok(addr) => tracing::info!(addr = %addr, "Server listening"),
            Err(e) => tracing::warn!(error = %e, "Server listening on unknown address"),
        }

        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let service = Arc::clone(&self.service);
                            let token = tracker.acquire();
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                let result =
                                    handle_connection(service, stream, remote_addr, shutdown).await;
                                if let Err(e) = result {
                                    tracing::debug!(
                                        remote_addr = %remote_addr,
                                        error = %e,
                                        "connection error"
                                    );
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to accept connection");
                        }
                    }
                }

                () = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        self.service.readiness().set_ready(false);

        let shutdown_timeout = self.config.shutdown_timeout();
        tracing::info!(
            timeout_secs = shutdown_timeout.as_secs(),
            active = tracker.active_connections(),
            "Waiting for connections to close"
        );

        tokio::select! {
            () = tracker.wait_for_shutdown() => {
                tracing::info!("All connections closed");
            }
            () = tokio::time::sleep(shutdown_timeout) => {
                tracing::warn!(
                    active = tracker.active_connections(),
                    "Shutdown timeout reached, dropping remaining connections"
                );
            }
        }

        tracing::info!("Server stopped");
    }
}

async fn handle_connection(
    service: Arc<RequestService>,
    stream: TcpStream,
    remote_addr: SocketAddr,
    shutdown: ShutdownSignal,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);

    let handler = service_fn(move |req: Request<Incoming>| {
        let service = Arc::clone(&service);
        async move { Ok::<HttpResponse, Infallible>(service.serve(req).await.map(Full::new)) }
    });

    let conn = http1::Builder::new().serve_connection(io, handler);
    tokio::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => result,
        () = shutdown.recv() => {
            tracing::debug!(remote_addr = %remote_addr, "finishing connection for shutdown");
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    }
}
