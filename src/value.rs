//! Dynamic value representation for simulation input data.
//!
//! This module provides the [`Value`] enum which represents any datum
//! that can appear in a structured input file: a scalar (integer,
//! float, text, or the absent value) or an ordered list of further
//! values. Lists nest to arbitrary, ragged depth, which is how
//! layered and gridded input data arrives before it is shaped into
//! dense arrays.
//!
//! ## Core Types
//!
//! - [`Value`]: a scalar or an ordered list of [`Value`]s
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use siminput::Value;
//!
//! // From primitives
//! let missing = Value::Null;
//! let count = Value::from(42);
//! let head = Value::from(10.5);
//! let name = Value::from("wel-1");
//!
//! // Using the tree! macro
//! use siminput::tree;
//! let layers = tree!([[1.0, 2.0], [3.0]]);
//! assert!(layers.is_list());
//! ```
//!
//! ### Type Checking and Extraction
//!
//! ```rust
//! use siminput::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_int());
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically-typed datum from a simulation input file.
///
/// A value is either a scalar (`Null`, `Int`, `Float`, `Text`) or an
/// ordered list of values. Lists may nest unevenly; nothing forces
/// sibling branches to share a depth.
///
/// # Examples
///
/// ```rust
/// use siminput::Value;
///
/// let null = Value::Null;
/// let num = Value::Int(42);
/// let text = Value::Text("chd".to_string());
/// let row = Value::List(vec![Value::Int(1), Value::Float(2.5)]);
///
/// assert!(null.is_null());
/// assert!(num.is_int());
/// assert!(text.is_text());
/// assert!(row.is_list());
/// ```
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is text.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is any scalar (not a list).
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !self.is_list()
    }

    /// If the value is an integer, or a float with no fractional
    /// part in `i64` range, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siminput::Value;
    ///
    /// assert_eq!(Value::Int(42).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// If the value is numeric, returns it as an `f64`. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is text, returns a reference to it. Otherwise
    /// returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use siminput::Value;
    ///
    /// assert_eq!(Value::from("riv").as_str(), Some("riv"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if this value would need quoting when written
    /// back to an input file: empty text, or text containing
    /// whitespace or a field delimiter.
    #[inline]
    #[must_use]
    pub fn needs_quotes(&self) -> bool {
        match self {
            Value::Text(s) => {
                s.is_empty() || s.contains(char::is_whitespace) || s.contains(',')
            }
            _ => false,
        }
    }

    /// Empty-equivalence used by [`Value::is_all_empty`]: null, zero,
    /// and empty text all count as empty.
    pub(crate) fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Text(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Text(s) => {
                if self.needs_quotes() {
                    write!(f, "'{}'", s)
                } else {
                    write!(f, "{}", s)
                }
            }
            Value::List(items) => {
                write!(
                    f,
                    "[{}]",
                    items
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(3.5f64), Value::Float(3.5));
        assert_eq!(Value::from("kh"), Value::Text("kh".to_string()));
        assert_eq!(Value::from("kh".to_string()), Value::Text("kh".to_string()));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Float(7.0).as_i64(), Some(7));
        assert_eq!(Value::Float(7.5).as_i64(), None);
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::Text("x".into()).as_f64(), None);
        assert_eq!(Value::from("drn").as_str(), Some("drn"));
        assert!(Value::List(vec![]).as_list().is_some());
    }

    #[test]
    fn test_collect_into_list() {
        let row: Value = vec![1i64, 2, 3].into_iter().collect();
        assert_eq!(
            row,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::from("well field").to_string(), "'well field'");
        let row = Value::List(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(row.to_string(), "[1, a]");
    }

    #[test]
    fn test_falsiness() {
        assert!(Value::Null.is_falsy());
        assert!(Value::Int(0).is_falsy());
        assert!(Value::Float(0.0).is_falsy());
        assert!(Value::Text(String::new()).is_falsy());
        assert!(!Value::Int(1).is_falsy());
        assert!(!Value::Text("0".into()).is_falsy());
    }
}
