//! API error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use thela_core::DirectoryError;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Validation error
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// Missing or invalid session
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Wrong role or not the resource owner
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Resource not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Duplicate follow / duplicate vendor profile
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Internal error; detail stays in the logs
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(reason: impl Into<String>) -> Self {
        ApiError::Forbidden {
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Validation(message) => ApiError::ValidationError { message },
            DirectoryError::Forbidden(reason) => ApiError::Forbidden { reason },
            DirectoryError::NotFound { resource, id } => ApiError::NotFound {
                resource: resource.to_string(),
                id,
            },
            DirectoryError::Conflict(message) => ApiError::Conflict { message },
            DirectoryError::Storage(detail) => {
                // Opaque to the caller; the detail is for operators only
                tracing::error!(error = %detail, "Storage failure");
                ApiError::Internal {
                    message: "storage unavailable".to_string(),
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
