//! Extraction context providing access to request data.
//!
//! The [`ExtractionContext`] is what extractors see of an HTTP request once
//! the body has been collected.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// Default maximum request body size (1 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Context providing access to all parts of an HTTP request.
///
/// # Example
///
/// ```rust
/// use abacus_extract::ExtractionContext;
/// use bytes::Bytes;
/// use http::{HeaderMap, Method, Uri};
///
/// let ctx = ExtractionContext::new(
///     Method::POST,
///     Uri::from_static("/add"),
///     HeaderMap::new(),
///     Bytes::from_static(br#"{"a": 1, "b": 2}"#),
/// );
///
/// assert_eq!(ctx.method(), &Method::POST);
/// assert_eq!(ctx.path(), "/add");
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    body_limit: usize,
}

impl ExtractionContext {
    /// Creates a new extraction context with the default body limit.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Sets the maximum body size extractors accept.
    #[must_use]
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body as bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the maximum body size extractors accept.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Builder for constructing an `ExtractionContext`.
///
/// Method and URI default to `POST /`.
#[derive(Debug)]
pub struct ExtractionContextBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    body_limit: usize,
}

impl Default for ExtractionContextBuilder {
    fn default() -> Self {
        Self {
            method: Method::POST,
            uri: Uri::from_static("/"),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ExtractionContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Adds a single header. Invalid values are ignored.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the body limit.
    #[must_use]
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Builds the extraction context.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        ExtractionContext {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            body_limit: self.body_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_context_creation() {
        let ctx = ExtractionContext::new(
            Method::POST,
            Uri::from_static("/divide?x=1"),
            HeaderMap::new(),
            Bytes::from_static(b"{}"),
        );

        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.path(), "/divide");
        assert_eq!(ctx.body_limit(), DEFAULT_BODY_LIMIT);
        assert_eq!(ctx.body().as_ref(), b"{}");
    }

    #[test]
    fn test_extraction_context_builder() {
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static("/add"))
            .header("content-type", "application/json")
            .body(r#"{"a": 1}"#)
            .body_limit(16)
            .build();

        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.path(), "/add");
        assert_eq!(ctx.content_type(), Some("application/json"));
        assert_eq!(ctx.body_limit(), 16);
        assert_eq!(ctx.header("missing"), None);
    }
}
