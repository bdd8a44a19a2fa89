//! Upload pipeline handlers.
//!
//! Both endpoints run a strict sequential pipeline: each step's input is
//! the previous step's output, there is no retry anywhere, and any failure
//! aborts the rest of the pipeline. The catalog record is only written
//! after the artifact it references is durably stored.

use axum::body::Bytes;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use reel_models::{generate_storage_key, VideoRecord};
use reel_storage::ObjectRef;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::videos::{fetch_owned_record, parse_video_id, presign_video_record};
use crate::state::AppState;

/// Multipart field name for thumbnail uploads.
const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart field name for video uploads.
const VIDEO_FIELD: &str = "video";

/// Upload a thumbnail image for a video.
///
/// The raw bytes are written to the assets root under a random storage key
/// and the record's thumbnail reference is rewritten to the asset URL.
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoRecord>> {
    let video_id = parse_video_id(&video_id)?;

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Unable to parse upload: {e}")))?
    {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| ApiError::bad_request("Content-Type must be image"))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Unable to read upload: {e}")))?;

        upload = Some((content_type, data));
        break;
    }

    let (content_type, data) =
        upload.ok_or_else(|| ApiError::bad_request("Missing thumbnail field"))?;

    let (category, subtype) = split_media_type(&content_type)?;
    if category != "image" {
        return Err(ApiError::bad_request("Content-Type must be image"));
    }

    let record = fetch_owned_record(&state, &video_id, &user).await?;

    info!("Uploading thumbnail for video {} by user {}", video_id, user.user_id);

    let file_name = format!("{}.{}", generate_storage_key(), subtype);
    let path = state.config.assets_root.join(&file_name);
    fs::write(&path, &data)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store thumbnail: {e}")))?;

    let url = format!(
        "{}/assets/{}",
        state.config.public_base_url.trim_end_matches('/'),
        file_name
    );

    let record = record.with_thumbnail_url(url);
    state.store.update(record.clone()).await?;

    Ok(Json(record))
}

/// Upload a video for a catalog entry.
///
/// The body is streamed to a scratch file, remuxed for fast-start
/// playback, classified by aspect ratio, and stored remotely under
/// `{class}/{key}.mp4`. The response carries a signed URL in place of the
/// persisted object reference.
pub async fn upload_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoRecord>> {
    let video_id = parse_video_id(&video_id)?;
    let record = fetch_owned_record(&state, &video_id, &user).await?;

    info!("Uploading video {} by user {}", video_id, user.user_id);

    let scratch = tempfile::Builder::new()
        .prefix("reelstack-upload-")
        .suffix(".mp4")
        .tempfile()
        .map_err(|e| ApiError::internal(format!("Failed to create scratch file: {e}")))?;
    // TempPath removes the scratch file when dropped, including on early
    // error returns.
    let scratch_path = scratch.into_temp_path();

    let mut received: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Unable to parse upload: {e}")))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| ApiError::bad_request("File must be video/mp4"))?
            .to_string();
        let (category, container) = split_media_type(&content_type)?;
        if category != "video" || container != "mp4" {
            return Err(ApiError::bad_request("File must be video/mp4"));
        }

        stream_field_to_file(field, &scratch_path).await?;
        received = Some(content_type);
        break;
    }

    let content_type = received.ok_or_else(|| ApiError::bad_request("Missing video field"))?;

    // Remux for fast start, then drop the pre-normalized copy
    let normalized = state.media.normalize(&scratch_path).await?;
    scratch_path
        .close()
        .map_err(|e| ApiError::internal(format!("Failed to remove scratch file: {e}")))?;

    // The remuxed copy is removed on every exit path from here on
    let normalized = scopeguard::guard(normalized, |path| {
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("Failed to remove processed file {}: {}", path.display(), e);
        }
    });

    let geometry = state.media.inspect(&normalized).await?;
    let class = geometry.aspect_class();

    let key = format!("{}/{}.mp4", class.as_str(), generate_storage_key());
    state
        .storage
        .put_file(&normalized, &key, &content_type)
        .await?;

    let reference = ObjectRef::new(state.storage.bucket(), key);
    let record = record.with_video_url(reference.to_string());
    state.store.update(record.clone()).await?;

    info!("Stored video {} as {}", video_id, reference);

    // The signed URL is derived per response, never persisted
    let record =
        presign_video_record(record, state.storage.as_ref(), state.config.signed_url_ttl).await?;
    Ok(Json(record))
}

/// Split a content type into its top-level category and subtype, dropping
/// any parameters. The subtype doubles as a file extension, so it is held
/// to registered-name characters that cannot traverse paths: alphanumerics
/// plus `+`, `-` and `.`, with `..` rejected outright.
fn split_media_type(content_type: &str) -> ApiResult<(&str, &str)> {
    let essence = content_type.split(';').next().unwrap_or(content_type).trim();

    let (category, subtype) = essence
        .split_once('/')
        .ok_or_else(|| ApiError::bad_request(format!("Malformed content type: {content_type}")))?;

    let subtype_ok = !subtype.is_empty()
        && !subtype.contains("..")
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if category.is_empty() || !subtype_ok {
        return Err(ApiError::bad_request(format!(
            "Unsupported content type: {content_type}"
        )));
    }

    Ok((category, subtype))
}

/// Stream a multipart field to a local file.
async fn stream_field_to_file(mut field: Field<'_>, path: &std::path::Path) -> ApiResult<()> {
    let mut file = fs::File::create(path)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to open scratch file: {e}")))?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::bad_request(format!("Unable to read upload: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to write scratch file: {e}")))?;
    }

    file.flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to flush scratch file: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::path::{Path as StdPath, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tempfile::TempDir;
    use tokio::sync::{Mutex, RwLock};
    use tower::ServiceExt;

    use reel_catalog::{MemoryStore, VideoStore};
    use reel_media::{Geometry, MediaProcessor, MediaResult};
    use reel_models::{VideoId, VideoRecord};
    use reel_storage::{ObjectStore, StorageResult};

    use crate::auth::Claims;
    use crate::config::ApiConfig;
    use crate::routes::create_router;
    use crate::state::AppState;

    const TEST_SECRET: &[u8] = b"test-secret";
    const BOUNDARY: &str = "reelstack-test-boundary";

    /// In-memory object store fake: records (size, content type) per key.
    #[derive(Default)]
    struct FakeObjectStore {
        objects: RwLock<HashMap<String, (u64, String)>>,
    }

    #[async_trait]
    impl ObjectStore for FakeObjectStore {
        fn bucket(&self) -> &str {
            "test-bucket"
        }

        async fn put_file(
            &self,
            path: &StdPath,
            key: &str,
            content_type: &str,
        ) -> StorageResult<()> {
            let size = tokio::fs::metadata(path).await?.len();
            self.objects
                .write()
                .await
                .insert(key.to_string(), (size, content_type.to_string()));
            Ok(())
        }

        async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
            Ok(format!(
                "https://signed.example/{key}?expires={}",
                expires_in.as_secs()
            ))
        }
    }

    /// Deterministic media fake: normalize copies the input to a
    /// `.processing` sibling, inspect returns a fixed geometry.
    struct FakeMedia {
        geometry: Geometry,
        normalized_paths: Mutex<Vec<PathBuf>>,
    }

    impl FakeMedia {
        fn new(width: u32, height: u32) -> Self {
            Self {
                geometry: Geometry { width, height },
                normalized_paths: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MediaProcessor for FakeMedia {
        async fn inspect(&self, _path: &StdPath) -> MediaResult<Geometry> {
            Ok(self.geometry)
        }

        async fn normalize(&self, path: &StdPath) -> MediaResult<PathBuf> {
            let mut output = path.as_os_str().to_os_string();
            output.push(".processing");
            let output = PathBuf::from(output);
            tokio::fs::copy(path, &output).await?;
            self.normalized_paths.lock().await.push(output.clone());
            Ok(output)
        }
    }

    struct TestContext {
        state: AppState,
        store: Arc<MemoryStore>,
        storage: Arc<FakeObjectStore>,
        media: Arc<FakeMedia>,
        _assets: TempDir,
    }

    fn test_context(width: u32, height: u32) -> TestContext {
        let assets = TempDir::new().unwrap();
        let config = ApiConfig {
            jwt_secret: String::from_utf8(TEST_SECRET.to_vec()).unwrap(),
            assets_root: assets.path().to_path_buf(),
            public_base_url: "http://localhost:8000".to_string(),
            ..Default::default()
        };

        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(FakeObjectStore::default());
        let media = Arc::new(FakeMedia::new(width, height));

        let state = AppState::new(
            config,
            store.clone(),
            storage.clone(),
            media.clone(),
        );

        TestContext {
            state,
            store,
            storage,
            media,
            _assets: assets,
        }
    }

    fn token_for(user: &str) -> String {
        let claims = Claims {
            sub: user.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET),
        )
        .unwrap()
    }

    async fn seed_video(store: &MemoryStore, owner: &str) -> VideoId {
        let record = VideoRecord::new(VideoId::new(), owner, "Test video");
        let id = record.id;
        store.insert(record).await.unwrap();
        id
    }

    fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"{field}\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, token: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_record(response: axum::response::Response) -> VideoRecord {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_thumbnail_upload_succeeds_for_owner() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png bytes");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/thumbnail"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let record = response_record(response).await;
        let url = record.thumbnail_url.unwrap();

        // URL ends in a 43-char base64url key plus the subtype extension
        let file_name = url.rsplit('/').next().unwrap();
        let key = file_name.strip_suffix(".png").unwrap();
        assert_eq!(key.len(), 43);
        assert!(url.starts_with("http://localhost:8000/assets/"));

        // The bytes landed under the assets root
        let stored = ctx.state.config.assets_root.join(file_name);
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), b"png bytes");

        // The record was persisted
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        assert!(persisted.thumbnail_url.is_some());
    }

    #[tokio::test]
    async fn test_thumbnail_rejects_non_image() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "notes.txt", "text/plain", b"hello");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/thumbnail"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        assert!(persisted.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_thumbnail_rejects_non_owner_without_writes() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png bytes");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/thumbnail"),
                &token_for("someone-else"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // No asset was written and the record is untouched
        let mut entries = tokio::fs::read_dir(&ctx.state.config.assets_root)
            .await
            .unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        assert!(persisted.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_unknown_video_is_not_found() {
        let ctx = test_context(1920, 1080);
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png bytes");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{}/thumbnail", VideoId::new()),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_video_id_is_bad_request() {
        let ctx = test_context(1920, 1080);
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png bytes");
        let response = app
            .oneshot(upload_request(
                "/videos/not-a-uuid/thumbnail",
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png bytes");
        let request = Request::builder()
            .method("POST")
            .uri(format!("/videos/{id}/thumbnail"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png bytes");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/thumbnail"),
                "not.a.token",
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_video_upload_classifies_stores_and_signs() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("video", "clip.mp4", "video/mp4", b"fake mp4 payload");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/video"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // The object landed under the aspect-class prefix
        let objects = ctx.storage.objects.read().await;
        assert_eq!(objects.len(), 1);
        let (key, (size, content_type)) = objects.iter().next().unwrap();
        assert!(key.starts_with("landscape/"));
        assert!(key.ends_with(".mp4"));
        assert_eq!(*size, b"fake mp4 payload".len() as u64);
        assert_eq!(content_type, "video/mp4");
        drop(objects);

        // The persisted reference is "{bucket},{key}" while the response
        // carries the signed URL
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        let stored_reference = persisted.video_url.unwrap();
        assert!(stored_reference.starts_with("test-bucket,landscape/"));

        let record = response_record(response).await;
        let signed = record.video_url.unwrap();
        assert!(signed.starts_with("https://signed.example/landscape/"));
        assert!(signed.contains("expires=300"));
    }

    #[tokio::test]
    async fn test_video_upload_portrait_prefix() {
        let ctx = test_context(1080, 1920);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("video", "clip.mp4", "video/mp4", b"fake mp4 payload");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/video"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let objects = ctx.storage.objects.read().await;
        assert!(objects.keys().all(|k| k.starts_with("portrait/")));
    }

    #[tokio::test]
    async fn test_video_upload_cleans_up_processed_file() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("video", "clip.mp4", "video/mp4", b"fake mp4 payload");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/video"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let normalized = ctx.media.normalized_paths.lock().await;
        assert_eq!(normalized.len(), 1);
        assert!(!normalized[0].exists(), "processed file should be removed");
    }

    #[tokio::test]
    async fn test_video_rejects_wrong_container() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("video", "clip.webm", "video/webm", b"webm payload");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/video"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(ctx.storage.objects.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_video_rejects_non_owner_without_writes() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("video", "clip.mp4", "video/mp4", b"fake mp4 payload");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/video"),
                &token_for("someone-else"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(ctx.storage.objects.read().await.is_empty());
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        assert!(persisted.video_url.is_none());
    }

    #[tokio::test]
    async fn test_oversize_video_is_rejected_before_storage() {
        let mut ctx = test_context(1920, 1080);
        ctx.state.config.max_video_size = 1024;
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("video", "clip.mp4", "video/mp4", &vec![0u8; 4096]);
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/video"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert!(ctx.storage.objects.read().await.is_empty());
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        assert!(persisted.video_url.is_none());
    }

    #[tokio::test]
    async fn test_get_video_signs_stored_reference() {
        let ctx = test_context(1920, 1080);
        let record = VideoRecord::new(VideoId::new(), "user-1", "Test video")
            .with_video_url("test-bucket,landscape/abc.mp4");
        let id = record.id;
        ctx.store.insert(record).await.unwrap();
        let app = create_router(ctx.state.clone());

        let request = Request::builder()
            .method("GET")
            .uri(format!("/videos/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {}", token_for("user-1")))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let record = response_record(response).await;
        assert_eq!(
            record.video_url.unwrap(),
            "https://signed.example/landscape/abc.mp4?expires=300"
        );

        // The stored reference is unchanged
        let persisted = ctx.store.get(&id).await.unwrap().unwrap();
        assert_eq!(
            persisted.video_url.unwrap(),
            "test-bucket,landscape/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_get_video_without_upload_is_unchanged() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let request = Request::builder()
            .method("GET")
            .uri(format!("/videos/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {}", token_for("user-1")))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let record = response_record(response).await;
        assert!(record.video_url.is_none());
    }

    #[test]
    fn test_split_media_type() {
        assert_eq!(split_media_type("image/png").unwrap(), ("image", "png"));
        assert_eq!(
            split_media_type("video/mp4; some=param").unwrap(),
            ("video", "mp4")
        );
        assert!(split_media_type("imagepng").is_err());
        assert!(split_media_type("image/").is_err());
        assert!(split_media_type("image/../../etc").is_err());
    }

    #[test]
    fn test_split_media_type_accepts_structured_subtypes() {
        assert_eq!(
            split_media_type("image/svg+xml").unwrap(),
            ("image", "svg+xml")
        );
        assert_eq!(split_media_type("image/x-icon").unwrap(), ("image", "x-icon"));
        assert_eq!(
            split_media_type("image/vnd.microsoft.icon").unwrap(),
            ("image", "vnd.microsoft.icon")
        );
        // Separator characters never make it into a file extension
        assert!(split_media_type("image/a..b").is_err());
        assert!(split_media_type("image/a\\b").is_err());
    }

    #[tokio::test]
    async fn test_thumbnail_accepts_structured_image_subtype() {
        let ctx = test_context(1920, 1080);
        let id = seed_video(&ctx.store, "user-1").await;
        let app = create_router(ctx.state.clone());

        let body = multipart_body("thumbnail", "thumb.svg", "image/svg+xml", b"<svg/>");
        let response = app
            .oneshot(upload_request(
                &format!("/videos/{id}/thumbnail"),
                &token_for("user-1"),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let record = response_record(response).await;
        let url = record.thumbnail_url.unwrap();
        assert!(url.ends_with(".svg+xml"));

        let file_name = url.rsplit('/').next().unwrap();
        let stored = ctx.state.config.assets_root.join(file_name);
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), b"<svg/>");
    }
}
