//! Error types for the grid crate.

use thiserror::Error;

/// Errors raised when a table is configured incorrectly.
///
/// These are programming errors on the caller's side: a page that builds
/// its columns wrong should find out the first time the table is built,
/// not render a silently broken view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The column set is empty.
    #[error("a table needs at least one column")]
    NoColumns,

    /// A column has an empty key.
    #[error("column at position {0} has an empty key")]
    EmptyColumnKey(usize),

    /// Two columns share the same key.
    #[error("duplicate column key '{0}'")]
    DuplicateColumn(String),

    /// A search key is listed twice.
    #[error("duplicate search key '{0}'")]
    DuplicateSearchKey(String),

    /// Page size must be at least one row.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
