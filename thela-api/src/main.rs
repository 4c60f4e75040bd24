//! Thela API server binary.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use thela_api::{run_server, ApiConfig};
use thela_store::MemoryStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env();
    let store = Arc::new(MemoryStore::new());

    if let Err(e) = run_server(config, store).await {
        tracing::error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
