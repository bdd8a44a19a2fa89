//! Axum HTTP API server.
//!
//! This crate provides:
//! - The upload-and-derive pipeline (thumbnail and video endpoints)
//! - JWT bearer authentication
//! - Signed-URL substitution for stored video references on read
//! - Static serving of locally stored thumbnails

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
