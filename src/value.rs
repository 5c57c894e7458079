//! Dynamic JSON value representation for converted cell data.
//!
//! This module provides the [`Value`] enum, the output of value conversion.
//! The conversion core only ever produces four shapes: `null` (absent optional
//! cells), numbers, strings, and ordered sequences (lists and tuples both
//! convert to sequences). Records assembled by the sheet layer map field names
//! to these values.
//!
//! ## Core Types
//!
//! - [`Value`]: any converted cell value (null, number, string, array)
//! - [`Number`]: a numeric value, integer or float
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::{Number, Value};
//!
//! let v = Value::from(42);
//! assert!(v.is_number());
//! assert_eq!(v.as_i64(), Some(42));
//!
//! let v = Value::Array(vec![Value::from("x"), Value::Null]);
//! assert_eq!(v.as_array().map(Vec::len), Some(2));
//! ```
//!
//! `Value` implements [`serde::Serialize`], so converted records render
//! directly with `serde_json`:
//!
//! ```rust
//! use gridcast::{Number, Value};
//!
//! let v = Value::Array(vec![Value::from(1), Value::from("a")]);
//! assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,"a"]"#);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed converted cell value.
///
/// # Examples
///
/// ```rust
/// use gridcast::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Number(Number),
    String(String),
    Array(Vec<Value>),
}

/// A numeric value, either integer or float.
///
/// Numeric cells are coerced through `f64`; [`Number::from_f64`] collapses
/// whole-valued floats back to integers so that `1` renders as `1` rather
/// than `1.0` in JSON output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Builds a `Number` from an `f64`, collapsing whole values in `i64`
    /// range to [`Number::Integer`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridcast::Number;
    ///
    /// assert_eq!(Number::from_f64(42.0), Number::Integer(42));
    /// assert_eq!(Number::from_f64(1.5), Number::Float(1.5));
    /// ```
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            Number::Integer(value as i64)
        } else {
            Number::Float(value)
        }
    }

    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Converts this number to an `i64` if it is an integer.
    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to an `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// If the value is a string, returns a reference to it. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer number, returns it. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from_f64(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}
