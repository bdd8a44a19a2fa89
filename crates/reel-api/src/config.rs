//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL under which `/assets` is reachable by clients
    pub public_base_url: String,
    /// Directory thumbnails are written to and served from
    pub assets_root: PathBuf,
    /// HS256 secret for bearer token validation
    pub jwt_secret: String,
    /// Hard cap on video upload bodies
    pub max_video_size: usize,
    /// Hard cap on thumbnail upload bodies
    pub max_thumbnail_size: usize,
    /// Expiry window for signed video URLs
    pub signed_url_ttl: Duration,
    /// Optional timeout for ffmpeg/ffprobe invocations
    pub tool_timeout: Option<Duration>,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            public_base_url: "http://localhost:8000".to_string(),
            assets_root: PathBuf::from("assets"),
            jwt_secret: String::new(),
            max_video_size: 1 << 30,        // 1 GiB
            max_thumbnail_size: 10 << 20,   // 10 MiB
            signed_url_ttl: Duration::from_secs(300),
            tool_timeout: None,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            assets_root: std::env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets")),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or_default(),
            max_video_size: std::env::var("MAX_VIDEO_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1 << 30),
            max_thumbnail_size: std::env::var("MAX_THUMBNAIL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 << 20),
            signed_url_ttl: Duration::from_secs(
                std::env::var("SIGNED_URL_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            tool_timeout: std::env::var("TOOL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
