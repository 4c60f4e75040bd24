//! Session authentication.
//!
//! Credential issuance lives outside this service; the identity
//! collaborator hands out opaque bearer tokens and registers them here.
//! The registry maps each token to an [`Identity`] whose role is the
//! token-asserted one — it takes precedence over the role stored on the
//! account record when the two disagree.
//!
//! Handlers opt into authentication by taking the [`AuthSession`]
//! extractor; routes without it stay public.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use thela_core::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Token→identity registry fed by the identity collaborator
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Identity>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a session token
    pub async fn register(&self, token: impl Into<String>, identity: Identity) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.into(), identity);
    }

    /// Resolve a bearer token to its identity
    pub async fn resolve(&self, token: &str) -> Option<Identity> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Drop a session token
    pub async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }
}

/// Extractor yielding the authenticated caller.
///
/// Rejects with 401 when the `Authorization: Bearer` header is missing,
/// malformed, or names an unknown session.
pub struct AuthSession(pub Identity);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("expected a bearer token"))?;

        let identity = state
            .sessions
            .resolve(token)
            .await
            .ok_or_else(|| ApiError::unauthorized("unknown or expired session"))?;

        Ok(AuthSession(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thela_core::Role;

    #[tokio::test]
    async fn test_register_and_resolve() {
        let registry = SessionRegistry::new();
        registry
            .register("tok_1", Identity::customer("user_1"))
            .await;

        let identity = registry.resolve("tok_1").await.unwrap();
        assert_eq!(identity.user_id.as_str(), "user_1");
        assert_eq!(identity.role, Role::Customer);

        assert!(registry.resolve("tok_2").await.is_none());
    }

    #[tokio::test]
    async fn test_revoke() {
        let registry = SessionRegistry::new();
        registry
            .register("tok_1", Identity::customer("user_1"))
            .await;
        registry.revoke("tok_1").await;
        assert!(registry.resolve("tok_1").await.is_none());
    }

    #[tokio::test]
    async fn test_reregister_overrides_role() {
        // A promoted account gets a fresh token-asserted role
        let registry = SessionRegistry::new();
        registry
            .register("tok_1", Identity::customer("user_1"))
            .await;
        registry.register("tok_1", Identity::vendor("user_1")).await;

        let identity = registry.resolve("tok_1").await.unwrap();
        assert_eq!(identity.role, Role::Vendor);
    }
}
