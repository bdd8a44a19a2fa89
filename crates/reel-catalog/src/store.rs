//! Video store trait.

use async_trait::async_trait;
use reel_models::{VideoId, VideoRecord};

use crate::error::CatalogResult;

/// Keyed store of video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a record by id. `Ok(None)` means the id is unknown.
    async fn get(&self, id: &VideoId) -> CatalogResult<Option<VideoRecord>>;

    /// Insert a new record. Fails if the id already exists.
    async fn insert(&self, record: VideoRecord) -> CatalogResult<()>;

    /// Replace an existing record in full. Fails if the id is unknown.
    async fn update(&self, record: VideoRecord) -> CatalogResult<()>;
}
