//! Video read handlers and shared record helpers.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::Json;

use reel_models::{VideoId, VideoRecord};
use reel_storage::{ObjectRef, ObjectStore};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Get a video record, with the stored video reference replaced by a
/// signed URL.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<VideoRecord>> {
    let video_id = parse_video_id(&video_id)?;
    let record = fetch_owned_record(&state, &video_id, &user).await?;

    let record =
        presign_video_record(record, state.storage.as_ref(), state.config.signed_url_ttl).await?;
    Ok(Json(record))
}

/// Parse a video id path parameter.
pub(crate) fn parse_video_id(s: &str) -> ApiResult<VideoId> {
    VideoId::parse(s).map_err(|_| ApiError::bad_request("Invalid video ID"))
}

/// Fetch a record and verify the caller owns it.
pub(crate) async fn fetch_owned_record(
    state: &AppState,
    id: &VideoId,
    user: &AuthUser,
) -> ApiResult<VideoRecord> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;

    if record.owner_id != user.user_id {
        return Err(ApiError::unauthorized("Not the owner of this video"));
    }

    Ok(record)
}

/// Replace a persisted `"{bucket},{key}"` video reference with a
/// time-limited signed URL.
///
/// A record without a stored video is returned unchanged; the signed URL
/// is never written back to the catalog.
pub(crate) async fn presign_video_record(
    mut record: VideoRecord,
    storage: &dyn ObjectStore,
    expires_in: Duration,
) -> ApiResult<VideoRecord> {
    let Some(stored) = record.video_url.as_deref() else {
        return Ok(record);
    };
    if stored.is_empty() {
        return Ok(record);
    }

    let reference = ObjectRef::parse(stored)?;
    let url = storage.presign_get(&reference.key, expires_in).await?;

    record.video_url = Some(url);
    Ok(record)
}
