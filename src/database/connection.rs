use std::time::Duration;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::settings::DatabaseSettings;
use crate::errors::StoreError;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

pub fn create_pool(settings: &DatabaseSettings) -> Result<DbPool> {
    let manager = build_manager(&settings.path);
    build_pool(manager, settings)
}

/// Pool over a private in-memory database, for tests and for embedding
/// the tournament in a process that needs no file.
///
/// Every SQLite memory connection is its own database, so the pool holds
/// exactly one connection and never recycles it.
pub fn create_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|c| c.execute_batch(CONNECTION_PRAGMAS));

    r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
        .map_err(StoreError::from)
        .context("Failed to create in-memory connection pool")
}

fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path).with_init(|c| c.execute_batch(CONNECTION_PRAGMAS))
}

fn build_pool(manager: SqliteConnectionManager, settings: &DatabaseSettings) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(Duration::from_secs(settings.connection_timeout_secs))
        .build(manager)
        .map_err(StoreError::from)
        .with_context(|| format!("Failed to create database connection pool for {}", settings.path))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .map_err(StoreError::from)
        .context("Failed to get database connection from pool")
}
