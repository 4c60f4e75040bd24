//! Storage error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A storage-level uniqueness constraint rejected the write
    #[error("Constraint violation: {0}")]
    Conflict(String),

    /// The row targeted by an update does not exist
    #[error("Row not found: {0}")]
    Missing(String),

    /// Backend unavailable, timed out, or otherwise failed
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for thela_core::DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => thela_core::DirectoryError::Conflict(msg),
            // A Missing row after an existence check, or any backend
            // failure, is a storage-layer fault from the core's view.
            other => thela_core::DirectoryError::Storage(other.to_string()),
        }
    }
}
