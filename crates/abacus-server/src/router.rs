//! Request routing.
//!
//! The route table is fixed at startup: the homepage, one `POST` route per
//! [`Operation`], health and readiness probes, and optionally the API docs.
//! Matching is exact on the path after trailing slashes are stripped, so
//! `/add/` and `/add` are the same route.
//!
//! # Example
//!
//! ```rust
//! use abacus_core::Operation;
//! use abacus_server::{RouteTarget, Router};
//! use http::{Method, StatusCode};
//!
//! let router = Router::new(true);
//!
//! assert_eq!(
//!     router.match_route(&Method::POST, "/divide/").unwrap(),
//!     RouteTarget::Operation(Operation::Divide),
//! );
//!
//! let err = router.match_route(&Method::GET, "/add").unwrap_err();
//! assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
//! ```

use abacus_core::{ApiError, ApiResult, Operation};
use http::Method;

/// What a matched route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// `GET /`
    Homepage,
    /// `POST /add`, `/subtract`, `/multiply`, `/divide`
    Operation(Operation),
    /// `GET /health`
    Health,
    /// `GET /ready`
    Ready,
    /// `GET /openapi.json`
    OpenApi,
    /// `GET /docs`
    Docs,
}

impl RouteTarget {
    /// Returns the operation name for operation routes.
    #[must_use]
    pub fn operation(self) -> Option<Operation> {
        match self {
            Self::Operation(op) => Some(op),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: &'static str,
    target: RouteTarget,
}

/// The service's route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Builds the route table. Documentation routes are only registered
    /// when `docs_enabled` is set.
    #[must_use]
    pub fn new(docs_enabled: bool) -> Self {
        let mut router = Self { routes: Vec::new() };
        router.add_route(Method::GET, "/", RouteTarget::Homepage);
        for op in Operation::ALL {
            router.add_route(Method::POST, op.path(), RouteTarget::Operation(op));
        }
        router.add_route(Method::GET, "/health", RouteTarget::Health);
        router.add_route(Method::GET, "/ready", RouteTarget::Ready);
        if docs_enabled {
            router.add_route(Method::GET, "/openapi.json", RouteTarget::OpenApi);
            router.add_route(Method::GET, "/docs", RouteTarget::Docs);
        }
        router
    }

    fn add_route(&mut self, method: Method, path: &'static str, target: RouteTarget) {
        self.routes.push(Route {
            method,
            path,
            target,
        });
    }

    /// Matches a request against the route table.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] when no route has this path
    /// - [`ApiError::MethodNotAllowed`] when the path exists under other
    ///   methods, listing them for the `Allow` header
    pub fn match_route(&self, method: &Method, path: &str) -> ApiResult<RouteTarget> {
        let path = normalize_path(path);
        let mut allowed = Vec::new();

        for route in self.routes.iter().filter(|route| route.path == path) {
            if route.method == *method {
                return Ok(route.target);
            }
            allowed.push(route.method.clone());
        }

        if allowed.is_empty() {
            Err(ApiError::not_found(path))
        } else {
            Err(ApiError::method_not_allowed(method.clone(), allowed))
        }
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strips trailing slashes, keeping the root as `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
