//! Server configuration

/// Membership server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://membership.db?mode=rwc".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }
}
