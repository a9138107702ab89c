//! Numeric values carried through the service.
//!
//! JSON does not distinguish integers from floating-point numbers, but the
//! service does: `{"a": 10, "b": 5}` added together answers `15`, while a
//! division always answers a float such as `5.0`. [`Number`] keeps track of
//! which of the two a value is so that responses can preserve it.

use std::fmt;

use serde::{Serialize, Serializer};

/// A numeric operand or result.
///
/// Serializes as a bare JSON number. `Float` values are always rendered with
/// a fractional part (`5.0`), `Int` values never are (`5`). Non-finite floats
/// have no JSON representation; callers check [`Number::is_finite`] before
/// rendering a result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
}

impl Number {
    /// Returns the value as an `f64`.
    ///
    /// Integers beyond 2^53 lose precision.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    /// Returns the integer value, if this is an `Int`.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Float(_) => None,
        }
    }

    /// Returns `true` for `Int` values.
    #[must_use]
    pub fn is_int(self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns `true` for `Float` values.
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns `true` if the value is zero (`0`, `0.0` or `-0.0`).
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(value) => value == 0,
            Self::Float(value) => value == 0.0,
        }
    }

    /// Returns `true` unless the value is an infinite or NaN float.
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(value) => value.is_finite(),
        }
    }

    /// Converts the value to a `Float`, leaving floats untouched.
    #[must_use]
    pub fn to_float(self) -> Self {
        Self::Float(self.as_f64())
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(value) => serializer.serialize_i64(value),
            Self::Float(value) => serializer.serialize_f64(value),
        }
    }
}
