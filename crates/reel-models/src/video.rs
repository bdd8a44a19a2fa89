//! Video catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a catalog video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub Uuid);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a path parameter string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for VideoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A video record in the metadata catalog.
///
/// The upload pipeline only ever rewrites the two reference fields
/// (`thumbnail_url`, `video_url`) and `updated_at`; ownership is fixed at
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Unique video ID
    pub id: VideoId,

    /// Owner user ID
    pub owner_id: String,

    /// Display title
    pub title: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// URL of the locally stored thumbnail, if one has been uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Reference to the stored video, if one has been uploaded.
    ///
    /// Persisted as the `"{bucket},{key}"` object reference; replaced by a
    /// time-limited signed URL in API responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl VideoRecord {
    /// Create a new record with no media references.
    pub fn new(id: VideoId, owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id: owner_id.into(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            thumbnail_url: None,
            video_url: None,
        }
    }

    /// Set the thumbnail reference, bumping `updated_at`.
    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self.updated_at = Utc::now();
        self
    }

    /// Set the video reference, bumping `updated_at`.
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self.updated_at = Utc::now();
        self
    }
}
