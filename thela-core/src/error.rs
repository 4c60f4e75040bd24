//! Shared error taxonomy for the directory core.

use thiserror::Error;

/// Errors surfaced by the directory core services.
///
/// Validation and authorization failures are detected synchronously and
/// carry caller-safe messages. `Storage` wraps backend failures; its detail
/// is for logs, never for API responses.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result alias used across the core services.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        DirectoryError::Validation(message.into())
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        DirectoryError::Forbidden(message.into())
    }

    /// Create a not-found error for a resource/id pair
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        DirectoryError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        DirectoryError::Conflict(message.into())
    }
}
