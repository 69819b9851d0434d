//! Database connection pool management.

use crate::error::DbError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default timeout when acquiring a connection from the pool.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// A PostgreSQL connection pool for the campus services.
///
/// Thin wrapper around [`sqlx::PgPool`] with sensible defaults. Model
/// methods take `&PgPool` directly; use [`DbPool::inner`] to pass the
/// underlying pool around.
#[derive(Debug, Clone)]
pub struct DbPool(PgPool);

impl DbPool {
    /// Connect to the database and verify the connection.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the database is unreachable
    /// or the credentials are invalid.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        tracing::info!(max_connections = DEFAULT_MAX_CONNECTIONS, "Database pool created");
        Ok(Self(pool))
    }

    /// Create a pool without establishing a connection up front.
    ///
    /// Connections are opened lazily on first use. Useful for tests that
    /// exercise code paths which never touch the database.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the URL cannot be parsed.
    pub fn connect_lazy(database_url: &str) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
            .connect_lazy(database_url)
            .map_err(DbError::ConnectionFailed)?;
        Ok(Self(pool))
    }

    /// Access the underlying `sqlx` pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.0
    }

    /// Consume the wrapper, returning the underlying pool.
    #[must_use]
    pub fn into_inner(self) -> PgPool {
        self.0
    }
}
