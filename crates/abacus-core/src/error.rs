//! Error types for Abacus.
//!
//! Two kinds of failure belong to the arithmetic contract:
//!
//! | Kind | Type | Status | Body |
//! |---|---|---|---|
//! | Malformed input | [`ValidationError`] | 422 | `{"detail": [ ... ]}` |
//! | Division by zero | [`DomainError`] | 400 | `{"error": "Cannot divide by zero!"}` |
//!
//! Everything else the HTTP layer can produce (unknown route, wrong method,
//! oversized body, timeout, internal fault) is a transport error. All of them
//! are unified in [`ApiError`], which knows its status code and response body.

use std::fmt;

use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// The exact message returned when dividing by zero.
pub const DIVISION_BY_ZERO_MESSAGE: &str = "Cannot divide by zero!";

const FIELD_REQUIRED: &str = "Field required";
const JSON_DECODE_ERROR: &str = "JSON decode error";
const NOT_AN_OBJECT: &str = "Input should be a valid dictionary or object to extract fields from";
const NOT_A_NUMBER: &str = "Input should be a valid number";
const UNPARSABLE_NUMBER: &str = "Input should be a valid number, unable to parse string as a number";

/// A business-rule violation detected while computing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The divisor was zero.
    #[error("Cannot divide by zero!")]
    DivisionByZero,
}

impl DomainError {
    /// Returns the client-facing message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::DivisionByZero => DIVISION_BY_ZERO_MESSAGE,
        }
    }
}

/// One segment of a validation error location.
///
/// Locations read like a path into the request: `["body", "a"]` points at
/// field `a`, `["body", 7]` at byte offset 7 of an unparsable body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocItem {
    /// An object key.
    Key(String),
    /// A numeric position.
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for LocItem {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for LocItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Machine-readable error type (`missing`, `float_parsing`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Where in the request the failure occurred.
    pub loc: Vec<LocItem>,
    /// Human-readable message.
    pub msg: String,
    /// The offending input.
    pub input: Value,
    /// Extra context, such as the JSON parser message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    fn new(kind: &str, loc: Vec<LocItem>, msg: &str, input: Value) -> Self {
        Self {
            kind: kind.to_string(),
            loc,
            msg: msg.to_string(),
            input,
            ctx: None,
        }
    }

    /// Returns the location joined with dots, e.g. `body.a`.
    #[must_use]
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// The request body did not match the `{"a": number, "b": number}` schema.
///
/// Serialized as `{"detail": [ ... ]}`. Validation stops at the first
/// violation, so every constructor produces exactly one [`FieldError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// The body was empty.
    #[must_use]
    pub fn missing_body() -> Self {
        Self::single(FieldError::new(
            "missing",
            vec!["body".into()],
            FIELD_REQUIRED,
            Value::Null,
        ))
    }

    /// The body was not valid JSON. `offset` is the byte position at which
    /// parsing failed.
    #[must_use]
    pub fn json_invalid(offset: usize, error: impl Into<String>) -> Self {
        let mut field = FieldError::new(
            "json_invalid",
            vec!["body".into(), offset.into()],
            JSON_DECODE_ERROR,
            json!({}),
        );
        field.ctx = Some(json!({ "error": error.into() }));
        Self::single(field)
    }

    /// The body was valid JSON but not an object.
    #[must_use]
    pub fn not_an_object(input: Value) -> Self {
        Self::single(FieldError::new(
            "model_attributes_type",
            vec!["body".into()],
            NOT_AN_OBJECT,
            input,
        ))
    }

    /// A required field was absent. `input` is the whole received object.
    #[must_use]
    pub fn missing_field(field: &str, input: Value) -> Self {
        Self::single(FieldError::new(
            "missing",
            vec!["body".into(), field.into()],
            FIELD_REQUIRED,
            input,
        ))
    }

    /// A field was present but not a number. `input` is the field's value.
    #[must_use]
    pub fn invalid_number(field: &str, input: Value) -> Self {
        let (kind, msg) = if input.is_string() {
            ("float_parsing", UNPARSABLE_NUMBER)
        } else {
            ("float_type", NOT_A_NUMBER)
        };
        Self::single(FieldError::new(
            kind,
            vec!["body".into(), field.into()],
            msg,
            input,
        ))
    }

    fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Returns the individual failures.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the response body, `{"detail": [ ... ]}`.
    #[must_use]
    pub fn body(&self) -> Value {
        json!({ "detail": self.errors })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(error) => write!(f, "{} at {}: {}", error.kind, error.location(), error.msg),
            None => f.write_str("invalid request"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every error the HTTP surface can return.
///
/// # Example
///
/// ```
/// use abacus_core::{ApiError, DomainError};
/// use http::StatusCode;
///
/// let error = ApiError::from(DomainError::DivisionByZero);
/// assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(error.body()["error"], "Cannot divide by zero!");
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The computation failed.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// No route matches the path.
    #[error("Not found: {path}")]
    NotFound {
        /// The requested path.
        path: String,
    },

    /// The path exists but not for this method.
    #[error("Method not allowed: {method}")]
    MethodNotAllowed {
        /// The requested method.
        method: Method,
        /// Methods the path accepts.
        allowed: Vec<Method>,
    },

    /// The body exceeded the configured limit.
    #[error("Payload too large: exceeds limit of {limit} bytes")]
    PayloadTooLarge {
        /// Maximum accepted body size in bytes.
        limit: usize,
    },

    /// The body did not arrive in time.
    #[error("Timeout: request body not received within {timeout_ms} ms")]
    RequestTimeout {
        /// The timeout that expired, in milliseconds.
        timeout_ms: u64,
    },

    /// An unexpected fault. The message is logged, never sent to clients.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl ApiError {
    /// Creates a not-found error for `path`.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a method-not-allowed error.
    #[must_use]
    pub fn method_not_allowed(method: Method, allowed: Vec<Method>) -> Self {
        Self::MethodNotAllowed { method, allowed }
    }

    /// Creates an internal error with a message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error wrapping a source error.
    #[must_use]
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RequestTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a stable machine-readable code, used in logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(DomainError::DivisionByZero) => "DIVISION_BY_ZERO",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::RequestTimeout { .. } => "REQUEST_TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns `true` for 5xx errors.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Returns the JSON response body.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Validation(error) => error.body(),
            Self::Domain(error) => json!({ "error": error.message() }),
            Self::NotFound { .. } => json!({ "detail": "Not Found" }),
            Self::MethodNotAllowed { .. } => json!({ "detail": "Method Not Allowed" }),
            Self::PayloadTooLarge { .. } => json!({ "detail": "Payload Too Large" }),
            Self::RequestTimeout { .. } => json!({ "detail": "Request Timeout" }),
            Self::Internal { .. } => json!({ "error": "Internal Server Error" }),
        }
    }

    /// Returns the value for the `Allow` header, for 405 responses.
    #[must_use]
    pub fn allow_header(&self) -> Option<String> {
        match self {
            Self::MethodNotAllowed { allowed, .. } => Some(
                allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_body() {
        let error = ApiError::from(DomainError::DivisionByZero);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_code(), "DIVISION_BY_ZERO");
        assert_eq!(
            serde_json::to_string(&error.body()).unwrap(),
            r#"{"error":"Cannot divide by zero!"}"#
        );
    }

    #[test]
    fn test_missing_field_shape() {
        let error = ValidationError::missing_field("b", json!({"a": 10}));
        assert_eq!(
            error.body(),
            json!({
                "detail": [{
                    "type": "missing",
                    "loc": ["body", "b"],
                    "msg": "Field required",
                    "input": {"a": 10}
                }]
            })
        );
        assert_eq!(error.to_string(), "missing at body.b: Field required");
    }

    #[test]
    fn test_invalid_number_kinds() {
        let string = ValidationError::invalid_number("a", json!("x"));
        assert_eq!(string.errors()[0].kind, "float_parsing");
        assert_eq!(string.errors()[0].msg, UNPARSABLE_NUMBER);

        let boolean = ValidationError::invalid_number("a", json!(true));
        assert_eq!(boolean.errors()[0].kind, "float_type");
        assert_eq!(boolean.errors()[0].msg, NOT_A_NUMBER);
    }

    #[test]
    fn test_json_invalid_has_offset_and_ctx() {
        let error = ValidationError::json_invalid(9, "expected value");
        let body = error.body();
        assert_eq!(body["detail"][0]["loc"], json!(["body", 9]));
        assert_eq!(body["detail"][0]["ctx"]["error"], "expected value");
    }

    #[test]
    fn test_ctx_omitted_when_absent() {
        let error = ValidationError::missing_body();
        let text = serde_json::to_string(&error.body()).unwrap();
        assert!(!text.contains("ctx"));
        assert_eq!(error.errors()[0].loc, vec![LocItem::Key("body".to_string())]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::missing_body()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::not_found("/x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::RequestTimeout { timeout_ms: 5 }.status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert!(ApiError::internal("boom").is_server_error());
    }

    #[test]
    fn test_allow_header() {
        let error = ApiError::method_not_allowed(Method::GET, vec![Method::POST]);
        assert_eq!(error.allow_header().as_deref(), Some("POST"));
        assert_eq!(error.body(), json!({"detail": "Method Not Allowed"}));
        assert!(ApiError::not_found("/").allow_header().is_none());
    }

    #[test]
    fn test_internal_does_not_leak_message() {
        let error = ApiError::internal_with_source(
            "database exploded",
            std::io::Error::new(std::io::ErrorKind::Other, "disk"),
        );
        let body = serde_json::to_string(&error.body()).unwrap();
        assert!(!body.contains("exploded"));
        assert_eq!(body, r#"{"error":"Internal Server Error"}"#);
        assert!(std::error::Error::source(&error).is_some());
    }
}
