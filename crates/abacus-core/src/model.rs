//! Request and response payloads for the operation routes.

use http::StatusCode;
use serde::Serialize;

use crate::error::DomainError;
use crate::number::Number;
use crate::operation::Operation;

/// A validated `{"a": number, "b": number}` request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperationRequest {
    /// Left operand.
    pub a: Number,
    /// Right operand.
    pub b: Number,
}

impl OperationRequest {
    /// Creates a request from two operands.
    #[must_use]
    pub const fn new(a: Number, b: Number) -> Self {
        Self { a, b }
    }

    /// Applies `operation` to the two operands.
    pub fn compute(&self, operation: Operation) -> Result<Number, DomainError> {
        operation.apply(self.a, self.b)
    }
}

/// The outcome of one operation, as sent to the client.
///
/// Exactly one of the two shapes is produced per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationResult {
    /// `{"result": number}`
    Success {
        /// The computed value.
        result: Number,
    },
    /// `{"error": string}`
    Failure {
        /// The client-facing error message.
        error: String,
    },
}

impl OperationResult {
    /// Returns `200 OK` for successes and `400 Bad Request` for failures.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::Failure { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns `true` for the success shape.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<Number, DomainError>> for OperationResult {
    fn from(outcome: Result<Number, DomainError>) -> Self {
        match outcome {
            Ok(result) => Self::Success { result },
            Err(error) => Self::Failure {
                error: error.message().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let request = OperationRequest::new(Number::Int(10), Number::Int(5));
        let result = OperationResult::from(request.compute(Operation::Add));
        assert!(result.is_success());
        assert_eq!(result.status_code(), StatusCode::OK);
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"result":15}"#);
    }

    #[test]
    fn test_divide_shape() {
        let request = OperationRequest::new(Number::Int(10), Number::Int(2));
        let result = OperationResult::from(request.compute(Operation::Divide));
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"result":5.0}"#);
    }

    #[test]
    fn test_failure_shape() {
        let request = OperationRequest::new(Number::Int(10), Number::Int(0));
        let result = OperationResult::from(request.compute(Operation::Divide));
        assert_eq!(result.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"error":"Cannot divide by zero!"}"#
        );
    }
}
