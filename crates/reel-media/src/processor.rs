//! Media processing capability trait.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{MediaError, MediaResult};
use crate::faststart::remux_fast_start;
use crate::probe::{probe_geometry, Geometry};

/// Narrow interface over the external inspection/normalization tools.
///
/// Handlers depend on this trait rather than on the ffmpeg binaries
/// directly, so tests can substitute deterministic fakes.
#[async_trait]
pub trait MediaProcessor: Send + Sync {
    /// Extract the first stream's geometry from a local media file.
    async fn inspect(&self, path: &Path) -> MediaResult<Geometry>;

    /// Rewrite a local media file into a streaming-optimized copy and
    /// return the new path. The input file is left in place.
    async fn normalize(&self, path: &Path) -> MediaResult<PathBuf>;
}

/// Production implementation backed by the ffmpeg/ffprobe binaries.
#[derive(Debug, Clone, Default)]
pub struct FfmpegProcessor {
    tool_timeout: Option<Duration>,
}

impl FfmpegProcessor {
    /// Create a processor with no tool timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a timeout applied to each child-process invocation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl MediaProcessor for FfmpegProcessor {
    async fn inspect(&self, path: &Path) -> MediaResult<Geometry> {
        probe_geometry(path, self.tool_timeout).await
    }

    async fn normalize(&self, path: &Path) -> MediaResult<PathBuf> {
        remux_fast_start(path, self.tool_timeout).await
    }
}

/// Await a child-process future, bounding it by `timeout` when configured.
///
/// The spawned command must set `kill_on_drop` so a timed-out child does
/// not outlive the request.
pub(crate) async fn run_with_timeout<F>(fut: F, timeout: Option<Duration>) -> MediaResult<Output>
where
    F: Future<Output = std::io::Result<Output>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| MediaError::Timeout(limit.as_secs()))?
            .map_err(MediaError::from),
        None => fut.await.map_err(MediaError::from),
    }
}
