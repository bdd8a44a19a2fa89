//! In-memory video store.

use std::collections::HashMap;

use async_trait::async_trait;
use reel_models::{VideoId, VideoRecord};
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::store::VideoStore;

/// RwLock-backed store for development and tests.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<VideoId, VideoRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn get(&self, id: &VideoId) -> CatalogResult<Option<VideoRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn insert(&self, record: VideoRecord) -> CatalogResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(CatalogError::AlreadyExists(record.id));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn update(&self, record: VideoRecord) -> CatalogResult<()> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.id) {
            return Err(CatalogError::NotFound(record.id));
        }
        records.insert(record.id, record);
        Ok(())
    }
}
