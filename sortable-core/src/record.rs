//! Record field access
//!
//! In-memory records expose their sort fields through [`FieldAccess`]. Keyed
//! records (JSON objects, maps) get an implementation out of the box; structs
//! implement the trait themselves or hand a closure to
//! [`Sortable::with_accessor`](crate::Sortable::with_accessor).
//!
//! All records in one collection are read through the same accessor, so a
//! collection is expected to be homogeneous in shape.

use crate::value::SortValue;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Read a named field from a record
pub trait FieldAccess {
    /// Return the value stored under `name`, or `None` if the record has no such field
    fn field(&self, name: &str) -> Option<SortValue>;
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    fn field(&self, name: &str) -> Option<SortValue> {
        (**self).field(name)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for Arc<T> {
    fn field(&self, name: &str) -> Option<SortValue> {
        (**self).field(name)
    }
}

impl FieldAccess for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<SortValue> {
        self.get(name).map(SortValue::from)
    }
}

impl FieldAccess for serde_json::Value {
    fn field(&self, name: &str) -> Option<SortValue> {
        self.as_object().and_then(|object| object.field(name))
    }
}

impl<V, S> FieldAccess for HashMap<String, V, S>
where
    V: Clone + Into<SortValue>,
    S: std::hash::BuildHasher,
{
    fn field(&self, name: &str) -> Option<SortValue> {
        self.get(name).cloned().map(Into::into)
    }
}

impl<V> FieldAccess for BTreeMap<String, V>
where
    V: Clone + Into<SortValue>,
{
    fn field(&self, name: &str) -> Option<SortValue> {
        self.get(name).cloned().map(Into::into)
    }
}

/// Accessor strategy used to read fields from records of type `R`
pub type Accessor<R> = Arc<dyn Fn(&R, &str) -> Option<SortValue> + Send + Sync>;

/// Accessor that defers to the record's own [`FieldAccess`] implementation
pub fn field_access<R: FieldAccess>() -> Accessor<R> {
    Arc::new(|record: &R, name: &str| record.field(name))
}
