//! Test error types.

/// Errors that can occur while building or reading test traffic.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    /// Request building failed
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// A header name or value is invalid
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Response body is not what was expected
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_has_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = TestError::from(source);
        assert!(error.to_string().starts_with("JSON error:"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
