//! Server setup and seed loading.

use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use thela_core::{Account, GeoPoint, Identity, Pincode, PostalAreaRecord, Role, UserId};
use thela_store::DirectoryStore;

use crate::routes::build_app;
use crate::state::{ApiConfig, AppState};

/// Seed file contents: postal area reference data plus the account and
/// session records the external identity collaborator would otherwise
/// provide.
#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub areas: Vec<SeedArea>,
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub sessions: Vec<SeedSession>,
}

#[derive(Debug, Deserialize)]
pub struct SeedArea {
    pub pincode: String,
    pub area_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeedAccount {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub pincode: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedSession {
    pub token: String,
    pub user_id: String,
    pub role: Role,
}

/// Apply a seed file to the state: areas into the store, accounts into the
/// store, sessions into the registry. Invalid rows are skipped with a
/// warning rather than aborting startup.
pub async fn apply_seed(state: &AppState, seed: SeedFile) {
    for area in seed.areas {
        let pincode = match Pincode::parse(&area.pincode) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(pincode = %area.pincode, error = %e, "Skipping seed area");
                continue;
            }
        };
        let record = PostalAreaRecord::new(
            pincode,
            area.area_name,
            GeoPoint::new(area.longitude, area.latitude),
        );
        if let Err(e) = state.store.put_area(&record).await {
            tracing::warn!(error = %e, "Failed to seed postal area");
        }
    }

    for account in seed.accounts {
        let mut record = Account::new(
            UserId(account.id),
            account.display_name,
            account.role,
        );
        match account.pincode.as_deref().map(Pincode::parse).transpose() {
            Ok(pincode) => record.pincode = pincode,
            Err(e) => {
                tracing::warn!(account = %record.id, error = %e, "Skipping seed account");
                continue;
            }
        }
        record.phone = account.phone;
        if let Err(e) = state.store.put_account(&record).await {
            tracing::warn!(error = %e, "Failed to seed account");
        }
    }

    for session in seed.sessions {
        state
            .sessions
            .register(
                session.token,
                Identity::new(UserId(session.user_id), session.role),
            )
            .await;
    }
}

/// Create the application and its listen address
pub async fn create_server(
    config: ApiConfig,
    store: Arc<dyn DirectoryStore>,
) -> Result<(Router, SocketAddr), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = config.listen_addr.parse()?;
    let state = AppState::with_config(config.clone(), store);

    if let Some(path) = &config.seed_path {
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: SeedFile = serde_json::from_str(&raw)?;
        apply_seed(&state, seed).await;
        tracing::info!(path = %path, "Seed file applied");
    }

    Ok((build_app(state), addr))
}

/// Run the API server until shutdown
pub async fn run_server(
    config: ApiConfig,
    store: Arc<dyn DirectoryStore>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(config, store).await?;

    tracing::info!("Thela API listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thela_store::MemoryStore;

    #[tokio::test]
    async fn test_apply_seed_skips_invalid_rows() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone());

        let seed: SeedFile = serde_json::from_str(
            r#"{
                "areas": [
                    {"pincode": "110001", "area_name": "Connaught Place",
                     "latitude": 28.6315, "longitude": 77.2167},
                    {"pincode": "bad", "area_name": "Nowhere",
                     "latitude": 0.0, "longitude": 0.0}
                ],
                "accounts": [
                    {"id": "user_1", "display_name": "Asha", "role": "customer"}
                ],
                "sessions": [
                    {"token": "tok_1", "user_id": "user_1", "role": "customer"}
                ]
            }"#,
        )
        .unwrap();

        apply_seed(&state, seed).await;

        let area = store
            .area_by_pincode(&Pincode::parse("110001").unwrap())
            .await
            .unwrap();
        assert!(area.is_some());
        assert!(state.sessions.resolve("tok_1").await.is_some());
        assert!(store
            .get_account(&UserId::from("user_1"))
            .await
            .unwrap()
            .is_some());
    }
}
