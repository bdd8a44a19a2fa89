//! Object storage capability trait.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Durable blob storage with put-object and presigned-GET operations.
///
/// The transport is treated as a capability: handlers depend on this trait
/// and tests substitute an in-memory fake.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket objects are written into.
    fn bucket(&self) -> &str;

    /// Stream a local file to the store under `key`.
    async fn put_file(&self, path: &Path, key: &str, content_type: &str) -> StorageResult<()>;

    /// Generate a time-limited signed retrieval URL for `key`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
