//! Application state for the membership server

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl AppState {
    /// Create a new AppState: open the pool and apply migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Build state around an existing pool (used by the integration tests)
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, BoxError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}
