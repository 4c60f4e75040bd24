//! HTTP handlers for the directory API.

pub mod areas;
pub mod comments;
pub mod follows;
pub mod health;
pub mod ratings;
pub mod vendors;

pub use areas::*;
pub use comments::*;
pub use follows::*;
pub use health::*;
pub use ratings::*;
pub use vendors::*;

use thela_core::{Identity, Role};

use crate::error::ApiError;

/// Reject callers whose token-asserted role does not match
pub(crate) fn require_role(identity: &Identity, role: Role, action: &str) -> Result<(), ApiError> {
    if identity.role == role {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "only {}s may {action}",
            role.as_str()
        )))
    }
}
