//! Scalar values shared by filters, records and compiled conditions

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A scalar field value.
///
/// Integer fields of every width widen to `Long`. Values of different
/// variants are never comparable; see [`Value::compare`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Long(i64),
    Text(String),
    Instant(DateTime<Utc>),
}

impl Value {
    /// Orders two values of the same variant.
    ///
    /// Returns `None` on a variant mismatch, so no ordering operator can
    /// match across types.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Long(a), Value::Long(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Instant(a), Value::Instant(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Returns the text content if this is a `Text` value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content if this is a `Long` value
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the variant name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Long(_) => "long",
            Value::Text(_) => "text",
            Value::Instant(_) => "instant",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Long(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Instant(t) => write!(f, "'{}'", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Long(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Instant(t)
    }
}

/// Operand types a filter can be declared over.
///
/// `Ord` keeps the `in`/`notIn` sets in a canonical order so that filter
/// equality and hashing are structural.
pub trait FilterValue: Clone + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Widens the operand into a [`Value`]
    fn to_value(&self) -> Value;
}

impl FilterValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FilterValue for i32 {
    fn to_value(&self) -> Value {
        Value::Long(i64::from(*self))
    }
}

impl FilterValue for i64 {
    fn to_value(&self) -> Value {
        Value::Long(*self)
    }
}

impl FilterValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FilterValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Instant(*self)
    }
}
