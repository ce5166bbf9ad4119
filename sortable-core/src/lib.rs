//! # Sortable Core
//!
//! Sorting of record collections by caller-facing field names.
//!
//! ## Overview
//!
//! - **Field tokens**: logical names map to one or more concrete fields, each
//!   optionally prefixed with a direction override (`--`, `++`, `-`, `+`)
//! - **Dual dispatch**: query views order themselves through [`OrderedView`];
//!   in-memory records get a stable multi-key sort
//! - **SQL fragments**: the same resolution renders an `ORDER BY` clause
//! - **Headers**: sorted results can be split into alphabetic, related-entity,
//!   fixed-value or date buckets
//!
//! ## Examples
//!
//! ```
//! use serde_json::json;
//! use sortable_core::{Sortable, fields::signed_names};
//!
//! assert_eq!(
//!     signed_names(["++one", "--two", "+three", "four", "-five"], "desc"),
//!     vec!["one", "-two", "-three", "-four", "five"],
//! );
//!
//! let people = vec![
//!     json!({ "last": "Smith", "first": "Bob" }),
//!     json!({ "last": "Jones", "first": "Alice" }),
//! ];
//! let sortable: Sortable<serde_json::Value> =
//!     Sortable::with_fields(people, [("name", vec!["last", "first"])]).unwrap();
//!
//! let sorted = sortable.sorted("name", "asc").unwrap();
//! assert_eq!(sorted.records().unwrap()[0]["first"], "Alice");
//! assert_eq!(sortable.sql_predicate("name", "desc", None), "last DESC, first DESC");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Collection shapes and the native view traits
pub mod collection;

/// Error types
pub mod error;

/// Field tokens, directions and logical field mappings
pub mod fields;

/// Header bucketing
pub mod headers;

/// Record field access
pub mod record;

/// Sort dispatch
pub mod sortable;

pub mod utils;

/// Comparable field values
pub mod value;

pub use collection::{Collection, FilteredView, HeaderPredicate, NoView, OrderedView};
pub use error::{Result, SortError};
pub use fields::{
    Direction, FieldMap, FieldSpec, SignedField, order_clause, prepare_fields, prepare_fields_with,
};
pub use headers::{
    Grouped, HeaderBuckets, HeaderKind, HeaderSettings, HeaderedSortable, RelatedHeader,
};
pub use record::{Accessor, FieldAccess};
pub use sortable::{Sortable, Sorted};
pub use value::SortValue;
