//! Core domain types for the Thela vendor directory.
//!
//! This crate is the leaf of the workspace: ids, the validated pincode
//! type, entities (vendor, menu item, rating, follow, comment, postal area,
//! account) and the shared error taxonomy. It contains no storage or HTTP
//! concerns; those live in `thela-store` and `thela-api`.

pub mod error;
pub mod types;

pub use error::{DirectoryError, DirectoryResult};
pub use types::*;
