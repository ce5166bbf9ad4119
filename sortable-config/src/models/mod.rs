pub mod sort;

pub use sort::{FieldTokens, HeadersConfig, SortConfig, SortConfigSource};
