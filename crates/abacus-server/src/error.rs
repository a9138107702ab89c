//! Server startup errors.
//!
//! Per-request failures never surface here; they become HTTP responses
//! via [`abacus_core::ApiError`].

use std::net::{AddrParseError, SocketAddr};

use abacus_docs::DocsError;

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured bind address is not a socket address.
    #[error("Invalid address '{addr}': {source}")]
    InvalidAddress {
        /// The configured address
        addr: String,
        /// Parse failure
        #[source]
        source: AddrParseError,
    },

    /// Failed to bind to the configured address.
    #[error("Failed to bind to {addr}: {source}")]
    BindError {
        /// The address we tried to bind
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The API documentation could not be rendered.
    #[error("Failed to render API docs: {0}")]
    Docs(#[from] DocsError),
}
