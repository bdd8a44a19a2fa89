//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::handlers::health::health;
use crate::handlers::uploads::{upload_thumbnail, upload_video};
use crate::handlers::videos::get_video;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let video_routes = Router::new()
        .route("/videos/:video_id", get(get_video))
        .route(
            "/videos/:video_id/thumbnail",
            post(upload_thumbnail).layer(DefaultBodyLimit::max(state.config.max_thumbnail_size)),
        )
        .route(
            "/videos/:video_id/video",
            post(upload_video).layer(DefaultBodyLimit::max(state.config.max_video_size)),
        );

    // Locally stored thumbnails are served straight from the assets root
    let asset_routes = Router::new().nest_service(
        "/assets",
        ServeDir::new(&state.config.assets_root),
    );

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .merge(video_routes)
        .merge(asset_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
