//! Liveness and readiness probes.
//!
//! - `/health` reports that the process is up, with its uptime.
//! - `/ready` reports whether new traffic should be sent. It flips to
//!   `false` once graceful shutdown starts and never flips back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Body of the `/health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Always `"healthy"` while the process is serving
    status: String,

    service: String,

    version: String,

    uptime_seconds: u64,
}

impl HealthStatus {
    /// Creates a healthy status.
    #[must_use]
    pub fn healthy(
        service: impl Into<String>,
        version: impl Into<String>,
        uptime: Duration,
    ) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            version: version.into(),
            uptime_seconds: uptime.as_secs(),
        }
    }

    /// Returns the status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the service version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the uptime in seconds.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.uptime_seconds
    }
}

/// Liveness check.
///
/// # Example
///
/// ```rust
/// use abacus_server::HealthCheck;
///
/// let health = HealthCheck::new("abacus", "0.1.0");
/// let status = health.status();
///
/// assert_eq!(status.status(), "healthy");
/// assert_eq!(status.service(), "abacus");
/// ```
#[derive(Debug, Clone)]
pub struct HealthCheck {
    service: String,
    version: String,
    start_time: Instant,
}

impl HealthCheck {
    /// Creates a health check, starting the uptime clock now.
    #[must_use]
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            start_time: Instant::now(),
        }
    }

    /// Returns the current health status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        HealthStatus::healthy(&self.service, &self.version, self.start_time.elapsed())
    }

    /// Returns the server uptime.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Body of the `/ready` endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadinessStatus {
    ready: bool,
}

impl ReadinessStatus {
    /// Returns whether the service is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Readiness check, shared between the request service and the server's
/// shutdown path.
///
/// # Example
///
/// ```rust
/// use abacus_server::ReadinessCheck;
///
/// let readiness = ReadinessCheck::new();
/// let shared = readiness.clone();
/// assert!(readiness.is_ready());
///
/// shared.set_ready(false);
/// assert!(!readiness.is_ready());
/// ```
#[derive(Debug, Clone)]
pub struct ReadinessCheck {
    ready: Arc<AtomicBool>,
}

impl ReadinessCheck {
    /// Creates a readiness check that starts out ready.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns whether the service is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Sets the readiness flag.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Returns the readiness status.
    #[must_use]
    pub fn status(&self) -> ReadinessStatus {
        ReadinessStatus {
            ready: self.is_ready(),
        }
    }
}

impl Default for ReadinessCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::healthy("abacus", "1.2.3", Duration::from_millis(61_500));
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "abacus");
        assert_eq!(json["version"], "1.2.3");
        assert_eq!(json["uptime_seconds"], 61);
    }

    #[test]
    fn test_health_check_reports_configured_names() {
        let health = HealthCheck::new("calc", "0.9.0");
        let status = health.status();
        assert_eq!(status.service(), "calc");
        assert_eq!(status.version(), "0.9.0");
        assert!(status.uptime_seconds() <= health.uptime().as_secs());
    }

    #[test]
    fn test_readiness_body() {
        let readiness = ReadinessCheck::new();
        assert_eq!(
            serde_json::to_string(&readiness.status()).unwrap(),
            r#"{"ready":true}"#
        );

        readiness.set_ready(false);
        assert_eq!(
            serde_json::to_string(&readiness.status()).unwrap(),
            r#"{"ready":false}"#
        );
    }

    #[test]
    fn test_readiness_is_shared_between_clones() {
        let readiness = ReadinessCheck::default();
        let clone = readiness.clone();
        clone.set_ready(false);
        assert!(!readiness.status().is_ready());
    }
}
