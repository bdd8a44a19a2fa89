//! Application state.

use std::sync::Arc;

use reel_catalog::{MemoryStore, VideoStore};
use reel_media::{FfmpegProcessor, MediaProcessor};
use reel_storage::{ObjectStore, S3Client};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Collaborators are held behind their capability traits so tests can
/// substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn VideoStore>,
    pub storage: Arc<dyn ObjectStore>,
    pub media: Arc<dyn MediaProcessor>,
}

impl AppState {
    /// Create state from explicit collaborators.
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStore>,
        media: Arc<dyn MediaProcessor>,
    ) -> Self {
        Self {
            config,
            store,
            storage,
            media,
        }
    }

    /// Create production state: S3 storage, ffmpeg tooling, in-memory catalog.
    pub fn from_env(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = S3Client::from_env()?;

        let mut media = FfmpegProcessor::new();
        if let Some(timeout) = config.tool_timeout {
            media = media.with_timeout(timeout);
        }

        Ok(Self {
            config,
            store: Arc::new(MemoryStore::new()),
            storage: Arc::new(storage),
            media: Arc::new(media),
        })
    }
}
