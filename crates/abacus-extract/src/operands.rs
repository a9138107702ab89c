//! Validation of the `{"a": number, "b": number}` operation body.
//!
//! Numbers are coerced in lax mode: JSON numbers are taken as they are, and
//! strings holding an integer or a finite decimal are accepted too. Anything
//! else (booleans, `null`, arrays, objects, non-numeric strings) is rejected.
//! Fields are checked in order `a` then `b`, and the first failure wins.

use abacus_core::{ApiError, ApiResult, Number, OperationRequest, ValidationError};
use serde_json::{Map, Value};

use crate::{ExtractionContext, FromRequest};

const FIELDS: [&str; 2] = ["a", "b"];

impl FromRequest for OperationRequest {
    fn from_request(ctx: &ExtractionContext) -> ApiResult<Self> {
        validate_operation_body(ctx.body(), ctx.body_limit())
    }
}

/// Validates a raw body into an [`OperationRequest`].
///
/// # Errors
///
/// - [`ApiError::PayloadTooLarge`] if `body` is longer than `limit`
/// - [`ApiError::Validation`] for every schema violation
///
/// # Example
///
/// ```rust
/// use abacus_core::Number;
/// use abacus_extract::validate_operation_body;
///
/// let request = validate_operation_body(br#"{"a": 10, "b": "2.5"}"#, 1024).unwrap();
/// assert_eq!(request.a, Number::Int(10));
/// assert_eq!(request.b, Number::Float(2.5));
/// ```
pub fn validate_operation_body(body: &[u8], limit: usize) -> ApiResult<OperationRequest> {
    if body.len() > limit {
        return Err(ApiError::PayloadTooLarge { limit });
    }
    if body.is_empty() {
        return Err(ValidationError::missing_body().into());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::json_invalid(error_offset(body, &e), e.to_string()))?;

    let Value::Object(object) = &value else {
        return Err(ValidationError::not_an_object(value).into());
    };

    let [a, b] = FIELDS.map(|field| operand(object, &value, field));
    Ok(OperationRequest::new(a?, b?))
}

fn operand(
    object: &Map<String, Value>,
    whole: &Value,
    field: &str,
) -> Result<Number, ValidationError> {
    let value = object
        .get(field)
        .ok_or_else(|| ValidationError::missing_field(field, whole.clone()))?;
    coerce_number(value).ok_or_else(|| ValidationError::invalid_number(field, value.clone()))
}

/// Coerces a JSON value into a [`Number`], or `None` if it is not numeric.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(Number::Int(int))
            } else {
                number.as_f64().map(Number::Float)
            }
        }
        Value::String(text) => parse_number(text.trim()),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::Int(int));
    }
    text.parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .map(Number::Float)
}

// serde_json reports a 1-based line and column; turn that into a byte offset.
fn error_offset(body: &[u8], error: &serde_json::Error) -> usize {
    if error.line() == 0 {
        return 0;
    }
    let preceding: usize = body
        .split(|byte| *byte == b'\n')
        .take(error.line() - 1)
        .map(|line| line.len() + 1)
        .sum();
    (preceding + error.column().saturating_sub(1)).min(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const LIMIT: usize = 1024;

    fn validation_error(body: &str) -> Value {
        match validate_operation_body(body.as_bytes(), LIMIT) {
            Err(ApiError::Validation(error)) => error.body()["detail"][0].clone(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_integers() {
        let request = validate_operation_body(br#"{"a": 10, "b": 5}"#, LIMIT).unwrap();
        assert_eq!(request, OperationRequest::new(Number::Int(10), Number::Int(5)));
    }

    #[test]
    fn test_valid_floats_and_extra_fields() {
        let request =
            validate_operation_body(br#"{"a": 1.5, "b": -2, "c": "ignored"}"#, LIMIT).unwrap();
        assert_eq!(request.a, Number::Float(1.5));
        assert_eq!(request.b, Number::Int(-2));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let request = validate_operation_body(br#"{"a": " 5 ", "b": "2.5"}"#, LIMIT).unwrap();
        assert_eq!(request.a, Number::Int(5));
        assert_eq!(request.b, Number::Float(2.5));
    }

    #[test]
    fn test_empty_body() {
        let error = validation_error("");
        assert_eq!(error["type"], "missing");
        assert_eq!(error["loc"], json!(["body"]));
    }

    #[test]
    fn test_invalid_json() {
        let error = validation_error(r#"{"a": 1,"#);
        assert_eq!(error["type"], "json_invalid");
        assert_eq!(error["msg"], "JSON decode error");
        assert_eq!(error["loc"][0], "body");
        assert!(error["loc"][1].is_u64());
        assert!(error["ctx"]["error"].is_string());
    }

    #[test]
    fn test_invalid_json_offset_on_later_line() {
        let error = validation_error("{\n  \"a\": x}");
        let offset = error["loc"][1].as_u64().unwrap();
        assert!((2..12).contains(&offset));
    }

    #[test]
    fn test_not_an_object() {
        let error = validation_error("[1, 2]");
        assert_eq!(error["type"], "model_attributes_type");
        assert_eq!(error["input"], json!([1, 2]));
    }

    #[test]
    fn test_missing_b() {
        let error = validation_error(r#"{"a": 10}"#);
        assert_eq!(error["type"], "missing");
        assert_eq!(error["loc"], json!(["body", "b"]));
        assert_eq!(error["input"], json!({"a": 10}));
    }

    #[test]
    fn test_a_is_checked_before_b() {
        let error = validation_error("{}");
        assert_eq!(error["loc"], json!(["body", "a"]));
    }

    #[test]
    fn test_non_numeric_string() {
        let error = validation_error(r#"{"a": "x", "b": 5}"#);
        assert_eq!(error["type"], "float_parsing");
        assert_eq!(error["loc"], json!(["body", "a"]));
        assert_eq!(error["input"], "x");
    }

    #[test]
    fn test_other_kinds_rejected() {
        for bad in ["true", "null", "[1]", r#"{"x": 1}"#] {
            let error = validation_error(&format!(r#"{{"a": 1, "b": {bad}}}"#));
            assert_eq!(error["type"], "float_type", "input {bad}");
            assert_eq!(error["loc"], json!(["body", "b"]));
        }
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        for bad in ["inf", "NaN", "-infinity"] {
            let error = validation_error(&format!(r#"{{"a": "{bad}", "b": 1}}"#));
            assert_eq!(error["type"], "float_parsing");
        }
    }

    #[test]
    fn test_payload_too_large() {
        let body = format!(r#"{{"a": 1, "b": 2, "pad": "{}"}}"#, "x".repeat(64));
        let result = validate_operation_body(body.as_bytes(), 32);
        assert!(matches!(result, Err(ApiError::PayloadTooLarge { limit: 32 })));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let request =
            validate_operation_body(br#"{"a": 18446744073709551615, "b": 1}"#, LIMIT).unwrap();
        assert!(request.a.is_float());
    }

    #[test]
    fn test_from_request_uses_context_limit() {
        let ctx = crate::ExtractionContextBuilder::new()
            .body(r#"{"a": 1, "b": 2}"#)
            .body_limit(4)
            .build();
        assert!(matches!(
            OperationRequest::from_request(&ctx),
            Err(ApiError::PayloadTooLarge { limit: 4 })
        ));
    }

    proptest! {
        #[test]
        fn prop_any_integer_pair_validates(a in any::<i64>(), b in any::<i64>()) {
            let body = format!(r#"{{"a": {a}, "b": {b}}}"#);
            let request = validate_operation_body(body.as_bytes(), LIMIT).unwrap();
            prop_assert_eq!(request, OperationRequest::new(Number::Int(a), Number::Int(b)));
        }

        #[test]
        fn prop_non_numeric_strings_never_validate(text in "[a-zA-Z_ ]{1,12}") {
            prop_assume!(text.trim().parse::<f64>().is_err());
            let body = json!({"a": text, "b": 1}).to_string();
            let is_validation_error = matches!(
                validate_operation_body(body.as_bytes(), LIMIT),
                Err(ApiError::Validation(_))
            );
            prop_assert!(is_validation_error);
        }
    }
}
