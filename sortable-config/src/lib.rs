//! Configuration for sortable collections.
//!
//! Field mappings and header settings are declared in TOML or JSON and loaded
//! from `$SORTABLE_CONFIG_PATH`, `$SORTABLE_CONFIG_JSON`, or a `sortable.toml`
//! next to the process. The loaded [`SortConfig`] builds the
//! [`sortable_core::FieldMap`] and [`sortable_core::HeaderSettings`] a
//! `Sortable` or `HeaderedSortable` is constructed from.

#![allow(missing_docs)]

pub mod error;
pub mod models;

pub use error::ConfigError;
pub use models::sort::{
    CONFIG_JSON_ENV, CONFIG_PATH_ENV, FieldTokens, HeadersConfig, SortConfig, SortConfigSource,
};
