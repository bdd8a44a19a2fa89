//! FFprobe stream geometry probing and aspect classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::processor::run_with_timeout;

/// Frame geometry of the first stream in a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Geometry {
    /// Classify this geometry into an aspect bucket.
    pub fn aspect_class(&self) -> AspectClass {
        AspectClass::classify(self.width, self.height)
    }
}

/// Aspect-ratio bucket used to partition remote storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectClass {
    Landscape,
    Portrait,
    Other,
}

impl AspectClass {
    /// Absolute tolerance around the reference ratios.
    const TOLERANCE: f32 = 1.0 / 32.0;

    /// Classify a width/height pair.
    ///
    /// Ratios within 1/32 of 16:9 are landscape, within 1/32 of 9:16 are
    /// portrait, everything else is other. Landscape is checked first.
    pub fn classify(width: u32, height: u32) -> Self {
        let ratio = width as f32 / height as f32;
        let landscape = 16.0_f32 / 9.0;
        let portrait = 9.0_f32 / 16.0;

        if (ratio - landscape).abs() <= Self::TOLERANCE {
            AspectClass::Landscape
        } else if (ratio - portrait).abs() <= Self::TOLERANCE {
            AspectClass::Portrait
        } else {
            AspectClass::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectClass::Landscape => "landscape",
            AspectClass::Portrait => "portrait",
            AspectClass::Other => "other",
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Probe a media file for the geometry of its first stream.
///
/// Invokes `ffprobe -v error -print_format json -show_streams` and parses
/// its stdout. A file with no streams is an error rather than a default
/// classification.
pub async fn probe_geometry(
    path: impl AsRef<Path>,
    timeout: Option<Duration>,
) -> MediaResult<Geometry> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    debug!("Probing {}", path.display());

    let child = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = run_with_timeout(child, timeout).await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            format!("exit status {}", output.status),
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_probe_geometry(&output.stdout, path)
}

/// Parse ffprobe JSON output into the first stream's geometry.
pub(crate) fn parse_probe_geometry(stdout: &[u8], path: &Path) -> MediaResult<Geometry> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let stream = probe
        .streams
        .first()
        .ok_or_else(|| MediaError::NoStreams(path.to_path_buf()))?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(Geometry { width, height }),
        _ => Err(MediaError::MissingDimensions(path.to_path_buf())),
    }
}
