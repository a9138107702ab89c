//! The request service: HTTP request in, HTTP response out.
//!
//! [`RequestService`] owns everything a request needs (the route table,
//! pre-rendered API docs, health and readiness state) and knows nothing about
//! sockets. The hyper server and the in-memory test client both call
//! [`RequestService::serve`].
//!
//! Every response gets an `x-request-id` header, and every request produces
//! exactly one `info` log line.

use std::time::{Duration, Instant};

use abacus_core::{ApiError, ApiResult, Operation, OperationRequest, OperationResult};
use abacus_docs::{OpenApiGenerator, SwaggerUi};
use abacus_extract::response::{
    error_response, json_bytes, operation_response, HtmlResponse, JsonResponse,
};
use abacus_extract::{ExtractionContext, FromRequest};
use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Request, Response, StatusCode};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::health::{HealthCheck, ReadinessCheck};
use crate::homepage::homepage;
use crate::router::{RouteTarget, Router};

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Socket-independent request handling, shared behind an `Arc`.
#[derive(Debug)]
pub struct RequestService {
    router: Router,
    health: HealthCheck,
    readiness: ReadinessCheck,
    openapi_json: Bytes,
    docs_html: Bytes,
    request_timeout: Duration,
    body_limit: usize,
}

impl RequestService {
    /// Builds the service, rendering the API docs once if they are enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Docs`] if the docs cannot be serialized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus_server::{RequestService, ServerConfig};
    ///
    /// let service = RequestService::new(&ServerConfig::default()).unwrap();
    /// assert!(service.readiness().is_ready());
    /// ```
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        let (openapi_json, docs_html) = if config.docs_enabled() {
            let spec = OpenApiGenerator::new()
                .title(config.docs_title())
                .version(env!("CARGO_PKG_VERSION"))
                .generate();
            let html = SwaggerUi::new(&spec)
                .title(config.docs_title())
                .swagger_version(config.swagger_version())
                .html_bytes()?;
            (Bytes::from(spec.to_json()?), html)
        } else {
            (Bytes::new(), Bytes::new())
        };

        Ok(Self {
            router: Router::new(config.docs_enabled()),
            health: HealthCheck::new(config.service_name(), env!("CARGO_PKG_VERSION")),
            readiness: ReadinessCheck::new(),
            openapi_json,
            docs_html,
            request_timeout: config.request_timeout(),
            body_limit: config.max_body_bytes(),
        })
    }

    /// Returns the readiness check. Clones share the same flag.
    #[must_use]
    pub fn readiness(&self) -> &ReadinessCheck {
        &self.readiness
    }

    /// Returns the health check.
    #[must_use]
    pub fn health(&self) -> &HealthCheck {
        &self.health
    }

    /// Returns the route table.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handles one request. Never fails: every error becomes a response.
    pub async fn serve<B>(&self, request: Request<B>) -> Response<Bytes>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let started = Instant::now();
        let (parts, body) = request.into_parts();
        let request_id = request_id(&parts.headers);

        let mut response = match self.route(&parts, body).await {
            Ok(response) => response,
            Err(error) => {
                log_error(&error, &request_id);
                error_response(&error)
            }
        };

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        tracing::info!(
            request_id = %request_id,
            http.method = %parts.method,
            http.path = %parts.uri.path(),
            http.status = response.status().as_u16(),
            latency_ms = started.elapsed().as_secs_f64() * 1000.0,
            "request completed"
        );

        response
    }

    async fn route<B>(&self, parts: &Parts, body: B) -> ApiResult<Response<Bytes>>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        match self.router.match_route(&parts.method, parts.uri.path())? {
            RouteTarget::Homepage => Ok(homepage()),
            RouteTarget::Operation(op) => {
                let body = self.collect_body(body).await?;
                self.compute(op, parts, body)
            }
            RouteTarget::Health => Ok(JsonResponse::new(self.health.status()).into_response()),
            RouteTarget::Ready => {
                let status = self.readiness.status();
                let code = if status.is_ready() {
                    StatusCode::OK
                } else {
                    StatusCode::SERVICE_UNAVAILABLE
                };
                Ok(JsonResponse::new(status).with_status(code).into_response())
            }
            RouteTarget::OpenApi => Ok(json_bytes(self.openapi_json.clone())),
            RouteTarget::Docs => Ok(HtmlResponse::new(self.docs_html.clone()).into_response()),
        }
    }

    fn compute(&self, op: Operation, parts: &Parts, body: Bytes) -> ApiResult<Response<Bytes>> {
        let ctx = ExtractionContext::new(
            parts.method.clone(),
            parts.uri.clone(),
            parts.headers.clone(),
            body,
        )
        .with_body_limit(self.body_limit);

        let request = OperationRequest::from_request(&ctx)?;
        let outcome = request.compute(op);
        if let Ok(value) = outcome {
            // JSON has no representation for infinities or NaN.
            if !value.is_finite() {
                return Err(ApiError::internal(format!(
                    "{op} of {} and {} is not a finite number",
                    request.a, request.b
                )));
            }
        }

        let result = OperationResult::from(outcome);
        if let OperationResult::Failure { error } = &result {
            tracing::debug!(operation = %op, error = %error, "operation rejected");
        }
        Ok(operation_response(&result))
    }

    async fn collect_body<B>(&self, body: B) -> ApiResult<Bytes>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let collect = Limited::new(body, self.body_limit).collect();
        match tokio::time::timeout(self.request_timeout, collect).await {
            Ok(Ok(collected)) => Ok(collected.to_bytes()),
            Ok(Err(e)) if e.is::<LengthLimitError>() => Err(ApiError::PayloadTooLarge {
                limit: self.body_limit,
            }),
            Ok(Err(e)) => Err(ApiError::internal(format!(
                "failed to read request body: {e}"
            ))),
            Err(_) => Err(ApiError::RequestTimeout {
                timeout_ms: u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

// An incoming id is echoed only if it is a UUID.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .unwrap_or_else(Uuid::now_v7)
        .to_string()
}

fn log_error(error: &ApiError, request_id: &str) {
    if error.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            error_code = error.error_code(),
            error = ?error,
            "request failed"
        );
    } else {
        tracing::debug!(
            request_id = %request_id,
            error_code = error.error_code(),
            error = %error,
            "request rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use http::{header, Method};
    use http_body_util::Full;
    use hyper::body::Frame;
    use serde_json::Value;

    // Never yields a frame.
    struct StalledBody;

    impl Body for StalledBody {
        type Data = Bytes;
        type Error = std::io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, Self::Error>>> {
            Poll::Pending
        }
    }

    // Fails on the first read.
    struct BrokenBody;

    impl Body for BrokenBody {
        type Data = Bytes;
        type Error = std::io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, Self::Error>>> {
            Poll::Ready(Some(Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))))
        }
    }

    fn post_body<B>(path: &str, body: B) -> Request<B> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .body(body)
            .unwrap()
    }

    fn service() -> RequestService {
        RequestService::new(&ServerConfig::default()).unwrap()
    }

    fn post(path: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    fn get(path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    fn json(response: &Response<Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[tokio::test]
    async fn test_add() {
        let response = service().serve(post("/add", r#"{"a": 10, "b": 5}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), br#"{"result":15}"#);
    }

    #[tokio::test]
    async fn test_divide_by_zero() {
        let response = service().serve(post("/divide", r#"{"a": 10, "b": 0}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body().as_ref(),
            br#"{"error":"Cannot divide by zero!"}"#
        );
    }

    #[tokio::test]
    async fn test_validation_error() {
        let response = service().serve(post("/subtract", r#"{"a": 10}"#)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json(&response)["detail"][0]["loc"][1], "b");
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let response = service().serve(get("/health")).await;
        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        let uuid = Uuid::parse_str(id).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_valid_request_id_is_echoed() {
        let id = "0190a6a4-3f2e-7c1b-9d7e-4b5a6c7d8e9f";
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, id)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = service().serve(request).await;
        assert_eq!(response.headers()[REQUEST_ID_HEADER], id);
    }

    #[tokio::test]
    async fn test_invalid_request_id_is_replaced() {
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "not-a-uuid")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = service().serve(request).await;
        assert_ne!(response.headers()[REQUEST_ID_HEADER], "not-a-uuid");
    }

    #[tokio::test]
    async fn test_errors_carry_request_id() {
        let response = service().serve(get("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = ServerConfig::builder().max_body_bytes(8).build();
        let service = RequestService::new(&config).unwrap();
        let response = service.serve(post("/add", r#"{"a": 10, "b": 5}"#)).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json(&response), serde_json::json!({"detail": "Payload Too Large"}));
    }

    #[tokio::test]
    async fn test_slow_body_times_out() {
        let config = ServerConfig::builder()
            .request_timeout(Duration::from_millis(50))
            .build();
        let service = RequestService::new(&config).unwrap();

        let response = tokio::time::timeout(
            Duration::from_secs(2),
            service.serve(post_body("/add", StalledBody)),
        )
        .await
        .expect("the request timeout should fire first");

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(json(&response), serde_json::json!({"detail": "Request Timeout"}));
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_body_read_failure_is_internal_error() {
        let response = service().serve(post_body("/divide", BrokenBody)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body().as_ref(),
            br#"{"error":"Internal Server Error"}"#
        );
    }

    #[tokio::test]
    async fn test_body_is_not_read_for_non_operation_routes() {
        let request = Request::builder()
            .uri("/health")
            .body(StalledBody)
            .unwrap();
        let response = service().serve(request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_finite_result_is_internal_error() {
        let service = service();
        for (path, body) in [
            ("/multiply", r#"{"a": 1e308, "b": 10}"#),
            ("/add", r#"{"a": 1.7e308, "b": 1.7e308}"#),
            ("/divide", r#"{"a": 1e308, "b": 1e-308}"#),
        ] {
            let response = service.serve(post(path, body)).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{path}");
            assert_eq!(
                response.body().as_ref(),
                br#"{"error":"Internal Server Error"}"#
            );
        }
    }

    #[tokio::test]
    async fn test_readiness_flip() {
        let service = service();
        assert_eq!(service.serve(get("/ready")).await.status(), StatusCode::OK);

        service.readiness().set_ready(false);
        let response = service.serve(get("/ready")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.body().as_ref(), br#"{"ready":false}"#);
    }

    #[tokio::test]
    async fn test_docs_disabled() {
        let config = ServerConfig::builder().docs_enabled(false).build();
        let service = RequestService::new(&config).unwrap();
        assert_eq!(
            service.serve(get("/openapi.json")).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(service.serve(get("/docs")).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let response = service().serve(get("/openapi.json")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = json(&response);
        assert!(doc["paths"]["/divide"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_get_on_operation_is_405() {
        let response = service().serve(get("/add")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
    }
}
