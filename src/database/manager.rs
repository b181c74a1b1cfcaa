use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// Uniqueness violation on the product business key
    #[error("Duplicate product code: {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the single connection pool for the process.
///
/// Built once at startup and handed to the request layer; cloning shares the
/// same underlying pool.
#[derive(Clone, Debug)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Opens the pool eagerly so a bad URL or unreachable server fails at startup
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let host = Self::describe_target(&config.url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await?;

        info!("Connected to database at {}", host);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Best-effort close; skipped entirely if the process dies abnormally
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }

    /// Host and database name of a connection string, without credentials
    fn describe_target(database_url: &str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        let host = url.host_str().ok_or(DatabaseError::InvalidDatabaseUrl)?;
        Ok(format!("{}{}", host, url.path()))
    }
}
