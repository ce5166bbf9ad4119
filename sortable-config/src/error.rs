use sortable_core::{HeaderKind, SortError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid field mapping: {0}")]
    Fields(#[source] SortError),

    #[error("invalid header configuration: {0}")]
    Headers(#[source] SortError),

    #[error("{kind:?} headers need related items; use header_settings_with_related")]
    RelatedItemsRequired { kind: HeaderKind },

    #[error("{kind:?} headers need `related_header_field` to be set")]
    MissingRelatedHeaderField { kind: HeaderKind },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
