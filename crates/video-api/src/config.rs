//! API configuration.

use std::time::Duration;

pub const MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "webm"];

/// Video service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    /// Base URL of the credential service, used to validate bearer tokens.
    pub credential_service_url: String,
    /// Base URL of the notification service, called after a job completes.
    pub notification_service_url: String,
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(60),
            max_body_size: MAX_UPLOAD_BYTES,
            credential_service_url: "http://localhost:8080".to_string(),
            notification_service_url: "http://localhost:8082".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8081),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            max_body_size: MAX_UPLOAD_BYTES,
            credential_service_url: std::env::var("MS_AUTH_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            notification_service_url: std::env::var("MS_NOTIFY_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
