//! # Abacus Extract
//!
//! Request validation and response builders for the Abacus service.
//!
//! The only request body the service accepts is `{"a": number, "b": number}`.
//! [`OperationRequest`](abacus_core::OperationRequest) implements
//! [`FromRequest`], turning the collected body into validated operands or a
//! structured [`ApiError`](abacus_core::ApiError).
//!
//! ## Example
//!
//! ```rust
//! use abacus_core::{Number, OperationRequest};
//! use abacus_extract::{ExtractionContextBuilder, FromRequest};
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .body(r#"{"a": 10, "b": 5}"#)
//!     .build();
//!
//! let request = OperationRequest::from_request(&ctx).unwrap();
//! assert_eq!(request.a, Number::Int(10));
//! ```
//!
//! ## Response Builders
//!
//! ```rust
//! use abacus_extract::response::{HtmlResponse, JsonResponse};
//! use serde_json::json;
//!
//! let json = JsonResponse::new(json!({"ready": true})).into_response();
//! let html = HtmlResponse::new("<h1>Abacus</h1>").into_response();
//! ```

#![doc(html_root_url = "https://docs.rs/abacus-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod extractor;
mod operands;
pub mod response;

pub use context::{ExtractionContext, ExtractionContextBuilder, DEFAULT_BODY_LIMIT};
pub use extractor::FromRequest;
pub use operands::{coerce_number, validate_operation_body};
