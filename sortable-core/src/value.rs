//! Sort values extracted from records
//!
//! A [`SortValue`] wraps whatever a record yields for a field name and gives
//! it a total order. Values of the same kind compare naturally, integers and
//! floats compare numerically, and different kinds fall back to a fixed rank.
//! Missing data (`Null`) is kept at the end of a sort in either direction by
//! [`SortValue::compare_with_order`].

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A comparable field value
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
    Text(String),
    List(Vec<SortValue>),
}

impl SortValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        SortValue::Text(value.into())
    }

    /// Check if this value represents missing data
    pub fn is_null(&self) -> bool {
        matches!(self, SortValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SortValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            SortValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// True when this value is a list holding `needle`, or is `needle` itself
    pub fn contains(&self, needle: &SortValue) -> bool {
        match self {
            SortValue::List(items) => items.iter().any(|item| item == needle),
            other => other == needle,
        }
    }

    /// Case-insensitive prefix test on text values
    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        match self {
            SortValue::Text(s) => s.to_lowercase().starts_with(&prefix.to_lowercase()),
            _ => false,
        }
    }

    /// Compare two values while ensuring missing values always sort last
    pub fn compare_with_order(&self, other: &Self, reverse: bool) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                if reverse {
                    other.cmp(self)
                } else {
                    self.cmp(other)
                }
            }
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Int(_) | SortValue::Float(_) => 1,
            SortValue::DateTime(_) => 2,
            SortValue::Text(_) => 3,
            SortValue::List(_) => 4,
            SortValue::Null => 5,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use SortValue::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => OrderedFloat(*a).cmp(&OrderedFloat(*b)),
            (Int(a), Float(b)) => compare_int_float(*a, *b),
            (Float(a), Int(b)) => compare_int_float(*b, *a).reverse(),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (List(a), List(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Exact comparison of an integer with a float.
///
/// `i as f64` rounds above 2^53, so a tie there is settled on the integers.
/// NaN sorts above every number, as in `OrderedFloat`.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    match OrderedFloat(int as f64).cmp(&OrderedFloat(float)) {
        // An equal float is integral and within +-2^63, so the cast is exact
        Ordering::Equal => i128::from(int).cmp(&(float as i128)),
        ord => ord,
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Null => Ok(()),
            SortValue::Bool(b) => write!(f, "{b}"),
            SortValue::Int(i) => write!(f, "{i}"),
            SortValue::Float(x) => write!(f, "{x}"),
            SortValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            SortValue::Text(s) => f.write_str(s),
            SortValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Bool(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Int(value)
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        SortValue::Int(value.into())
    }
}

impl From<u32> for SortValue {
    fn from(value: u32) -> Self {
        SortValue::Int(value.into())
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Float(value)
    }
}

impl From<f32> for SortValue {
    fn from(value: f32) -> Self {
        SortValue::Float(value.into())
    }
}

impl From<DateTime<Utc>> for SortValue {
    fn from(value: DateTime<Utc>) -> Self {
        SortValue::DateTime(value)
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SortValue::Null)
    }
}

impl<T: Into<SortValue>> From<Vec<T>> for SortValue {
    fn from(value: Vec<T>) -> Self {
        SortValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<&serde_json::Value> for SortValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => SortValue::Null,
            Value::Bool(b) => SortValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SortValue::Int(i),
                None => n.as_f64().map(SortValue::Float).unwrap_or(SortValue::Null),
            },
            Value::String(s) => SortValue::Text(s.clone()),
            Value::Array(items) => SortValue::List(items.iter().map(SortValue::from).collect()),
            // Nested objects have no meaningful order
            Value::Object(_) => SortValue::Null,
        }
    }
}
