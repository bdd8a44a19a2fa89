//! Catalog error types.

use reel_models::VideoId;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Video not found: {0}")]
    NotFound(VideoId),

    #[error("Video already exists: {0}")]
    AlreadyExists(VideoId),

    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
