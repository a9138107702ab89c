//! # Abacus Core
//!
//! Core types for the Abacus arithmetic service.
//!
//! This crate holds everything that does not touch a socket:
//!
//! - [`Number`] - a JSON number that remembers whether it is an integer
//! - [`Operation`] - the four arithmetic operations and their dispatch
//! - [`OperationRequest`] / [`OperationResult`] - the request and response payloads
//! - [`ApiError`] - the error taxonomy and its HTTP mapping
//!
//! ## Example
//!
//! ```rust
//! use abacus_core::{Number, Operation, OperationRequest};
//!
//! let request = OperationRequest::new(Number::Int(10), Number::Int(2));
//!
//! let sum = request.compute(Operation::Add).unwrap();
//! assert_eq!(sum, Number::Int(12));
//!
//! let quotient = request.compute(Operation::Divide).unwrap();
//! assert_eq!(quotient, Number::Float(5.0));
//! ```

#![doc(html_root_url = "https://docs.rs/abacus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
mod model;
mod number;
mod operation;

pub use error::{
    ApiError, ApiResult, DomainError, FieldError, LocItem, ValidationError,
    DIVISION_BY_ZERO_MESSAGE,
};
pub use model::{OperationRequest, OperationResult};
pub use number::Number;
pub use operation::{Operation, UnknownOperation};
