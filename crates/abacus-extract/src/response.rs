//! Response builders for the service's responses.
//!
//! | Builder | Content-Type | Used for |
//! |---------|--------------|----------|
//! | [`JsonResponse`], [`json_bytes`] | `application/json` | results, errors, health, OpenAPI |
//! | [`HtmlResponse`] | `text/html; charset=utf-8` | homepage, Swagger UI |
//!
//! Builders never panic. A value that fails to serialize becomes a plain
//! 500 response.

use abacus_core::{ApiError, OperationResult};
use bytes::Bytes;
use http::{header, HeaderValue, Response, StatusCode};
use serde::Serialize;

const JSON: &str = "application/json";
const HTML: &str = "text/html; charset=utf-8";
const INTERNAL_ERROR_BODY: &[u8] = br#"{"error":"Internal Server Error"}"#;

/// JSON response builder.
///
/// # Example
///
/// ```rust
/// use abacus_extract::response::JsonResponse;
/// use serde_json::json;
///
/// let response = JsonResponse::new(json!({"ready": true})).into_response();
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.body().as_ref(), br#"{"ready":true}"#);
/// ```
#[derive(Debug)]
pub struct JsonResponse<T> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> JsonResponse<T> {
    /// Creates a new JSON response with status 200 OK.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        match serde_json::to_vec(&self.data) {
            Ok(body) => build(self.status, JSON, Bytes::from(body)),
            Err(_) => build(
                StatusCode::INTERNAL_SERVER_ERROR,
                JSON,
                Bytes::from_static(INTERNAL_ERROR_BODY),
            ),
        }
    }
}

/// HTML response builder.
///
/// # Example
///
/// ```rust
/// use abacus_extract::response::HtmlResponse;
///
/// let response = HtmlResponse::new("<h1>Abacus</h1>").into_response();
/// assert_eq!(
///     response.headers()["content-type"],
///     "text/html; charset=utf-8",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HtmlResponse {
    body: Bytes,
    status: StatusCode,
}

impl HtmlResponse {
    /// Creates a new HTML response with status 200 OK.
    #[must_use]
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        build(self.status, HTML, self.body)
    }
}

/// Builds a 200 response from an already-serialized JSON document.
#[must_use]
pub fn json_bytes(body: Bytes) -> Response<Bytes> {
    build(StatusCode::OK, JSON, body)
}

/// Builds the response for an operation outcome: 200 for a result, 400 for
/// a domain error.
#[must_use]
pub fn operation_response(result: &OperationResult) -> Response<Bytes> {
    JsonResponse::new(result)
        .with_status(result.status_code())
        .into_response()
}

/// Builds the response for an [`ApiError`], including the `Allow` header on
/// 405 responses.
///
/// # Example
///
/// ```rust
/// use abacus_core::ApiError;
/// use abacus_extract::response::error_response;
/// use http::{Method, StatusCode};
///
/// let error = ApiError::method_not_allowed(Method::GET, vec![Method::POST]);
/// let response = error_response(&error);
/// assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
/// assert_eq!(response.headers()["allow"], "POST");
/// ```
#[must_use]
pub fn error_response(error: &ApiError) -> Response<Bytes> {
    let mut response = JsonResponse::new(error.body())
        .with_status(error.status_code())
        .into_response();
    if let Some(allow) = error
        .allow_header()
        .and_then(|value| HeaderValue::from_str(&value).ok())
    {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

fn build(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
