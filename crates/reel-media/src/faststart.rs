//! Fast-start container remuxing.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};
use crate::processor::run_with_timeout;

/// Suffix appended to the input path for the remuxed copy.
const PROCESSING_SUFFIX: &str = ".processing";

/// Remux a video into a fast-start MP4 so playback can begin before the
/// whole file downloads.
///
/// The streams are copied, not re-encoded; only the container metadata is
/// reordered. The output is written to a sibling path suffixed
/// `.processing`, which is returned. The input file is left in place.
pub async fn remux_fast_start(
    path: impl AsRef<Path>,
    timeout: Option<Duration>,
) -> MediaResult<PathBuf> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let mut output_path = path.as_os_str().to_os_string();
    output_path.push(PROCESSING_SUFFIX);
    let output_path = PathBuf::from(output_path);

    debug!(
        "Remuxing {} to {}",
        path.display(),
        output_path.display()
    );

    let child = Command::new("ffmpeg")
        .arg("-y")
        .args(["-v", "error"])
        .arg("-i")
        .arg(path)
        .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
        .arg(&output_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match run_with_timeout(child, timeout).await {
        Ok(output) => output,
        Err(e) => {
            remove_partial_output(&output_path).await;
            return Err(e);
        }
    };

    if !output.status.success() {
        remove_partial_output(&output_path).await;
        return Err(MediaError::ffmpeg_failed(
            format!("exit status {}", output.status),
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
            output.status.code(),
        ));
    }

    info!("Remuxed {} for fast start", path.display());
    Ok(output_path)
}

/// Remove whatever ffmpeg managed to write before failing. ffmpeg may exit
/// before creating the output at all, so a missing file is not an error.
async fn remove_partial_output(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Failed to remove partial output {}: {}",
            path.display(),
            e
        ),
    }
}
