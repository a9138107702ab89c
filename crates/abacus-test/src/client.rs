//! In-memory test client.

use std::sync::Arc;

use abacus_server::{RequestService, ServerConfig, ServerError};
use bytes::Bytes;
use http::Method;
use serde::Serialize;

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::TestResponse;

/// Sends requests straight into a [`RequestService`], with no socket.
///
/// Requests go through the same routing, validation, error mapping and
/// request-id handling as traffic arriving over TCP.
///
/// # Example
///
/// ```rust
/// use abacus_test::TestClient;
/// use http::StatusCode;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let client = TestClient::with_defaults().unwrap();
///
/// client
///     .post_json("/add", &json!({"a": 10, "b": 5}))
///     .await
///     .assert_status(StatusCode::OK)
///     .assert_json_eq(&json!({"result": 15}));
/// # });
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct TestClient {
    service: Arc<RequestService>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client around an existing service.
    pub fn new(service: Arc<RequestService>) -> Self {
        Self {
            service,
            default_headers: Vec::new(),
        }
    }

    /// Creates a client around a fresh service built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be built.
    pub fn with_config(config: &ServerConfig) -> Result<Self, ServerError> {
        Ok(Self::new(Arc::new(RequestService::new(config)?)))
    }

    /// Creates a client around a service with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be built.
    pub fn with_defaults() -> Result<Self, ServerError> {
        Self::with_config(&ServerConfig::default())
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Returns the service under test.
    #[must_use]
    pub fn service(&self) -> &Arc<RequestService> {
        &self.service
    }

    /// Starts a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Starts a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let mut builder = TestRequestBuilder::new(method, uri);
        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        TestClientRequest {
            client: self,
            builder,
        }
    }

    /// POSTs `value` as JSON to `uri`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn post_json<T: Serialize>(&self, uri: impl AsRef<str>, value: &T) -> TestResponse {
        self.post(uri).json(value).send().await
    }

    /// Sends a prebuilt request.
    pub async fn send(&self, request: TestRequest) -> TestResponse {
        let response = self.service.serve(request.into_http_request()).await;
        TestResponse::from_http(response)
    }
}

/// A request builder bound to a [`TestClient`].
#[must_use]
#[derive(Debug)]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl TestClientRequest<'_> {
    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(mut self, content_type: impl AsRef<str>) -> Self {
        self.builder = self.builder.content_type(content_type);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built; use
    /// [`try_send`](Self::try_send) to handle that case.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("failed to build test request: {e}"),
        }
    }

    /// Sends the request, reporting build errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        Ok(self.client.send(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_post_json() {
        let client = TestClient::with_defaults().unwrap();
        let response = client.post_json("/multiply", &json!({"a": -3, "b": 4})).await;
        response
            .assert_status(StatusCode::OK)
            .assert_json_eq(&json!({"result": -12}));
    }

    #[tokio::test]
    async fn test_default_header_is_sent() {
        let id = "0190a6a4-3f2e-7c1b-9d7e-4b5a6c7d8e9f";
        let client = TestClient::with_defaults()
            .unwrap()
            .with_default_header("x-request-id", id);
        client
            .get("/health")
            .send()
            .await
            .assert_header("x-request-id", id);
    }

    #[tokio::test]
    async fn test_try_send_reports_build_errors() {
        let client = TestClient::with_defaults().unwrap();
        let result = client.get("/").header("bad header", "x").try_send().await;
        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_clients_share_a_service() {
        let client = TestClient::with_defaults().unwrap();
        let other = TestClient::new(Arc::clone(client.service()));
        other.service().readiness().set_ready(false);

        client
            .get("/ready")
            .send()
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
