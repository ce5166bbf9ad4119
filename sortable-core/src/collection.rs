//! Collection shapes a sortable can work with
//!
//! Sorting dispatches on [`Collection`]: query views that know how to order
//! themselves, in-memory record lists that are sorted here, and anything else,
//! which is rejected.

use crate::fields::SignedField;
use crate::value::SortValue;
use chrono::{DateTime, Utc};

/// A deferred view (typically a database query) that can reorder itself
pub trait OrderedView: Sized {
    /// Produce a new view ordered by the given signed fields
    fn order_by(&self, fields: &[SignedField]) -> Self;
}

/// A view that can be narrowed to a subset and checked for emptiness.
///
/// Header bucketing uses this to decide whether a header gets emitted.
pub trait FilteredView: OrderedView {
    fn filter(&self, predicate: &HeaderPredicate) -> Self;

    /// Realizing this may hit the backing store; errors are the view's concern
    fn is_empty(&self) -> bool;
}

/// Membership test for one header bucket
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderPredicate {
    /// Field text starts with `prefix`, ignoring case
    StartsWithIgnoreCase { field: String, prefix: String },
    /// Field equals `value`
    Equals { field: String, value: SortValue },
    /// Field equals one of `values`
    AnyOf { field: String, values: Vec<SortValue> },
    /// Field is a list containing `value` (or equals it)
    Contains { field: String, value: SortValue },
    /// Field is a date-time in `[from, until)`; open ends are unbounded
    Range {
        field: String,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    },
}

impl HeaderPredicate {
    pub fn field(&self) -> &str {
        match self {
            HeaderPredicate::StartsWithIgnoreCase { field, .. }
            | HeaderPredicate::Equals { field, .. }
            | HeaderPredicate::AnyOf { field, .. }
            | HeaderPredicate::Contains { field, .. }
            | HeaderPredicate::Range { field, .. } => field,
        }
    }

    /// Evaluate against an already extracted field value
    pub fn matches(&self, value: &SortValue) -> bool {
        match self {
            HeaderPredicate::StartsWithIgnoreCase { prefix, .. } => {
                value.starts_with_ignore_case(prefix)
            }
            HeaderPredicate::Equals { value: expected, .. } => {
                !value.is_null() && value == expected
            }
            HeaderPredicate::AnyOf { values, .. } => {
                !value.is_null() && values.iter().any(|expected| value == expected)
            }
            HeaderPredicate::Contains { value: needle, .. } => value.contains(needle),
            HeaderPredicate::Range { from, until, .. } => match value.as_datetime() {
                Some(at) => {
                    from.is_none_or(|from| at >= from) && until.is_none_or(|until| at < until)
                }
                None => false,
            },
        }
    }
}

/// Placeholder view for collections that are only ever in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoView {}

impl OrderedView for NoView {
    fn order_by(&self, _fields: &[SignedField]) -> Self {
        match *self {}
    }
}

impl FilteredView for NoView {
    fn filter(&self, _predicate: &HeaderPredicate) -> Self {
        match *self {}
    }

    fn is_empty(&self) -> bool {
        match *self {}
    }
}

/// The closed set of collection shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Collection<R, Q = NoView> {
    /// A view with its own ordering capability
    Native(Q),
    /// Records held in memory, sorted by comparison
    InMemory(Vec<R>),
    /// Something that can be neither ordered nor compared
    Unsupported { type_name: String },
}

impl<R, Q> Collection<R, Q> {
    /// Wrap a value of a type that cannot be sorted
    pub fn unsupported<T: ?Sized>() -> Self {
        Collection::Unsupported {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    pub fn as_records(&self) -> Option<&[R]> {
        match self {
            Collection::InMemory(records) => Some(records),
            _ => None,
        }
    }

    pub fn as_view(&self) -> Option<&Q> {
        match self {
            Collection::Native(view) => Some(view),
            _ => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<R>> {
        match self {
            Collection::InMemory(records) => Some(records),
            _ => None,
        }
    }

    pub fn into_view(self) -> Option<Q> {
        match self {
            Collection::Native(view) => Some(view),
            _ => None,
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Collection::Native(_) => "native",
            Collection::InMemory(_) => "in-memory",
            Collection::Unsupported { .. } => "unsupported",
        }
    }
}

impl<R, Q> From<Vec<R>> for Collection<R, Q> {
    fn from(records: Vec<R>) -> Self {
        Collection::InMemory(records)
    }
}
