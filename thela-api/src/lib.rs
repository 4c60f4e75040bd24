//! HTTP API for the Thela street-food vendor directory.
//!
//! Thin axum layer over `thela-engine`: DTOs, session auth, handlers,
//! error-to-status mapping, and server bootstrap. All domain invariants
//! live in the engine and the store; this crate only translates between
//! HTTP and core operations.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{AuthSession, SessionRegistry};
pub use error::{ApiError, ApiResult};
pub use routes::{build_app, create_router, create_v1_router};
pub use server::{apply_seed, create_server, run_server, SeedFile};
pub use state::{ApiConfig, AppState};
