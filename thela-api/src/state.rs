//! Application state shared across handlers.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use thela_engine::{
    AreaIndex, DiscussionBoard, FollowLedger, RatingConsensus, VendorDirectory, VendorProfiles,
};
use thela_store::DirectoryStore;

use crate::auth::SessionRegistry;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address
    pub listen_addr: String,
    /// Enable CORS
    pub enable_cors: bool,
    /// Service version
    pub version: String,
    /// Optional seed file (postal areas, accounts, sessions)
    pub seed_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            enable_cors: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            seed_path: None,
        }
    }
}

impl ApiConfig {
    /// Create from environment variables:
    /// `THELA_LISTEN_ADDR`, `THELA_ENABLE_CORS`, `THELA_SEED_FILE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("THELA_LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            enable_cors: std::env::var("THELA_ENABLE_CORS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.enable_cors),
            version: defaults.version,
            seed_path: std::env::var("THELA_SEED_FILE").ok(),
        }
    }
}

/// Shared state: the store plus one instance of each engine service.
pub struct AppState {
    pub config: ApiConfig,
    pub sessions: SessionRegistry,
    pub store: Arc<dyn DirectoryStore>,
    pub areas: AreaIndex,
    pub directory: VendorDirectory,
    pub consensus: RatingConsensus,
    pub ledger: FollowLedger,
    pub board: DiscussionBoard,
    pub profiles: VendorProfiles,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state over a store with default configuration
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self::with_config(ApiConfig::default(), store)
    }

    /// Create state with explicit configuration
    pub fn with_config(config: ApiConfig, store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            config,
            sessions: SessionRegistry::new(),
            areas: AreaIndex::new(store.clone()),
            directory: VendorDirectory::new(store.clone()),
            consensus: RatingConsensus::new(store.clone()),
            ledger: FollowLedger::new(store.clone()),
            board: DiscussionBoard::new(store.clone()),
            profiles: VendorProfiles::new(store.clone()),
            store,
            started_at: Utc::now(),
        }
    }

    /// Service uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thela_store::MemoryStore;

    #[test]
    fn test_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert!(config.enable_cors);
        assert!(config.seed_path.is_none());
    }

    #[tokio::test]
    async fn test_state_creation() {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        assert!(state.uptime_secs() < 2);
    }
}
