//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Manages a single SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given URI.
    ///
    /// Accepts `sqlite:` URLs (including `sqlite::memory:`) or a bare file path.
    /// In-memory databases get one connection that is never recycled, since each
    /// SQLite connection would otherwise see its own empty database.
    pub async fn new(uri: &str) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite pool: {}", uri);

        let options = if uri.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(uri)?
        } else {
            SqliteConnectOptions::new().filename(uri)
        };
        let options = options.create_if_missing(true);

        let pool_options = if is_memory_uri(uri) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection; later queries fail.
    pub async fn close(&self) {
        info!("Closing SQLite pool");
        self.pool.close().await;
    }
}

fn is_memory_uri(uri: &str) -> bool {
    uri.contains(":memory:") || uri.contains("mode=memory")
}
