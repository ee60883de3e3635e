//! Credential service configuration.

/// Default bearer token lifetime, in hours.
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

#[derive(Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Shared MAC secret. Read once at startup and treated as immutable.
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub environment: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-only-secret-do-not-use-in-prod".to_string()),
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
