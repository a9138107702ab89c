//! # Abacus Test
//!
//! In-memory HTTP testing for the Abacus service. Requests are handed
//! directly to the [`RequestService`](abacus_server::RequestService), so
//! tests exercise routing, validation and error mapping without binding a
//! port.
//!
//! ## Example
//!
//! ```rust
//! use abacus_test::TestClient;
//! use http::StatusCode;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let client = TestClient::with_defaults().unwrap();
//!
//! let response = client
//!     .post("/divide")
//!     .json(&json!({"a": 10, "b": 0}))
//!     .send()
//!     .await;
//!
//! response.assert_status(StatusCode::BAD_REQUEST);
//! assert_eq!(response.json_value().unwrap()["error"], "Cannot divide by zero!");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/abacus-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
