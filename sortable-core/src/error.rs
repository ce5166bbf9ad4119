use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("An object of this type can not be sorted: {0}")]
    UnsortableCollection(String),

    #[error("Invalid field mapping for '{logical}': {reason}")]
    InvalidFieldMapping { logical: String, reason: String },

    #[error("Related item #{index} has no '{field}' header field")]
    MissingHeaderField { index: usize, field: String },

    #[error("Invalid sort direction: {0}")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, SortError>;
