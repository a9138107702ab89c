//! Arithmetic operations and their dispatch.
//!
//! Each [`Operation`] is exposed as one HTTP resource (`/add`, `/subtract`,
//! `/multiply`, `/divide`). [`Operation::apply`] is the whole of the business
//! logic: three total functions and one that can fail.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::number::Number;

/// One of the four supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`, always a float, fails when `b` is zero.
    Divide,
}

impl Operation {
    /// All operations, in route registration order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operation name (`"add"`, `"subtract"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Returns the route path for this operation (`"/add"`, ...).
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Add => "/add",
            Self::Subtract => "/subtract",
            Self::Multiply => "/multiply",
            Self::Divide => "/divide",
        }
    }

    /// Returns a one-line human description, used in API docs.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Add => "Add two numbers",
            Self::Subtract => "Subtract b from a",
            Self::Multiply => "Multiply two numbers",
            Self::Divide => "Divide a by b",
        }
    }

    /// Returns `true` if this operation can fail with a [`DomainError`].
    #[must_use]
    pub const fn is_fallible(self) -> bool {
        matches!(self, Self::Divide)
    }

    /// Looks an operation up by name. Matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Looks an operation up by its route path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.path() == path)
    }

    /// Applies the operation to `a` and `b`.
    ///
    /// Add, subtract and multiply keep integer operands integer, falling back
    /// to floating point only when the `i64` result would overflow. Any float
    /// operand makes the result a float. Divide always returns a float.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DivisionByZero`] when dividing by `0`, `0.0` or
    /// `-0.0`, whatever the value of `a`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus_core::{DomainError, Number, Operation};
    ///
    /// assert_eq!(
    ///     Operation::Multiply.apply(Number::Int(-3), Number::Int(4)),
    ///     Ok(Number::Int(-12)),
    /// );
    /// assert_eq!(
    ///     Operation::Divide.apply(Number::Int(0), Number::Int(0)),
    ///     Err(DomainError::DivisionByZero),
    /// );
    /// ```
    pub fn apply(self, a: Number, b: Number) -> Result<Number, DomainError> {
        match self {
            Self::Add => Ok(integer_or_float(a, b, i64::checked_add, |x, y| x + y)),
            Self::Subtract => Ok(integer_or_float(a, b, i64::checked_sub, |x, y| x - y)),
            Self::Multiply => Ok(integer_or_float(a, b, i64::checked_mul, |x, y| x * y)),
            Self::Divide => {
                if b.is_zero() {
                    return Err(DomainError::DivisionByZero);
                }
                Ok(Number::Float(a.as_f64() / b.as_f64()))
            }
        }
    }
}

fn integer_or_float(
    a: Number,
    b: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Number {
    if let (Number::Int(x), Number::Int(y)) = (a, b) {
        if let Some(value) = int_op(x, y) {
            return Number::Int(value);
        }
    }
    Number::Float(float_op(a.as_f64(), b.as_f64()))
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown operation name or path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .or_else(|| Self::from_path(s))
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_integers_stays_integer() {
        let result = Operation::Add.apply(Number::Int(10), Number::Int(5));
        assert_eq!(result, Ok(Number::Int(15)));
    }

    #[test]
    fn test_add_mixed_is_float() {
        let result = Operation::Add.apply(Number::Int(1), Number::Float(0.5));
        assert_eq!(result, Ok(Number::Float(1.5)));
    }

    #[test]
    fn test_subtract() {
        assert_eq!(
            Operation::Subtract.apply(Number::Int(3), Number::Int(10)),
            Ok(Number::Int(-7))
        );
    }

    #[test]
    fn test_multiply_negative() {
        assert_eq!(
            Operation::Multiply.apply(Number::Int(-3), Number::Int(4)),
            Ok(Number::Int(-12))
        );
    }

    #[test]
    fn test_integer_overflow_promotes_to_float() {
        let result = Operation::Add
            .apply(Number::Int(i64::MAX), Number::Int(1))
            .unwrap();
        assert!(result.is_float());
        assert_eq!(result.as_f64(), i64::MAX as f64 + 1.0);

        let result = Operation::Multiply
            .apply(Number::Int(i64::MIN), Number::Int(-1))
            .unwrap();
        assert!(result.is_float());
    }

    #[test]
    fn test_divide_integers_is_float() {
        assert_eq!(
            Operation::Divide.apply(Number::Int(10), Number::Int(2)),
            Ok(Number::Float(5.0))
        );
    }

    #[test]
    fn test_divide_by_zero_variants() {
        for zero in [Number::Int(0), Number::Float(0.0), Number::Float(-0.0)] {
            assert_eq!(
                Operation::Divide.apply(Number::Int(10), zero),
                Err(DomainError::DivisionByZero)
            );
        }
    }

    #[test]
    fn test_zero_divided_by_zero_is_an_error() {
        assert_eq!(
            Operation::Divide.apply(Number::Int(0), Number::Int(0)),
            Err(DomainError::DivisionByZero)
        );
    }

    #[test]
    fn test_names_and_paths() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
            assert_eq!(Operation::from_path(op.path()), Some(op));
            assert_eq!(op.path(), format!("/{}", op.name()));
        }
        assert_eq!(Operation::from_name("modulo"), None);
        assert_eq!(Operation::from_name("Add"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("divide".parse::<Operation>(), Ok(Operation::Divide));
        assert_eq!("/multiply".parse::<Operation>(), Ok(Operation::Multiply));
        assert!("/".parse::<Operation>().is_err());
        let err = "power".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "unknown operation: power");
    }

    #[test]
    fn test_only_divide_is_fallible() {
        let fallible: Vec<_> = Operation::ALL.into_iter().filter(|op| op.is_fallible()).collect();
        assert_eq!(fallible, vec![Operation::Divide]);
    }

    proptest! {
        #[test]
        fn prop_integer_ops_match_i64(
            a in -1_000_000_i64..1_000_000,
            b in -1_000_000_i64..1_000_000,
        ) {
            let (x, y) = (Number::Int(a), Number::Int(b));
            prop_assert_eq!(Operation::Add.apply(x, y), Ok(Number::Int(a + b)));
            prop_assert_eq!(Operation::Subtract.apply(x, y), Ok(Number::Int(a - b)));
            prop_assert_eq!(Operation::Multiply.apply(x, y), Ok(Number::Int(a * b)));
        }

        #[test]
        fn prop_float_ops_match_f64(a in -1e9_f64..1e9, b in -1e9_f64..1e9) {
            let (x, y) = (Number::Float(a), Number::Float(b));
            prop_assert_eq!(Operation::Add.apply(x, y), Ok(Number::Float(a + b)));
            prop_assert_eq!(Operation::Subtract.apply(x, y), Ok(Number::Float(a - b)));
            prop_assert_eq!(Operation::Multiply.apply(x, y), Ok(Number::Float(a * b)));
        }

        #[test]
        fn prop_divide_is_always_float(
            a in any::<i32>(),
            b in any::<i32>().prop_filter("non-zero", |b| *b != 0),
        ) {
            let result = Operation::Divide.apply(a.into(), b.into()).unwrap();
            prop_assert!(result.is_float());
            prop_assert_eq!(result.as_f64(), f64::from(a) / f64::from(b));
        }

        #[test]
        fn prop_divide_by_zero_always_fails(a in any::<f64>()) {
            prop_assert_eq!(
                Operation::Divide.apply(Number::Float(a), Number::Int(0)),
                Err(DomainError::DivisionByZero)
            );
        }
    }
}
