//! Repository error types
//!
//! Store faults are carried through unchanged in [`RepositoryError::Storage`];
//! the other variants describe problems found by the repository itself.

use tracker_types::StoreError;

/// Result type alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// An entity could not be converted to or from a table item.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored item does not have the expected shape or type tag.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The underlying store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
