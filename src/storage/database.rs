//! SQLite Local Storage
//!
//! Durable key-value store backing memories and the itinerary, using rusqlite
//! with r2d2 connection pooling. Capacity is bounded the way browser local
//! storage is: a write that would exceed the quota is rejected and leaves the
//! previous value in place.

use std::path::Path;
use std::time::Duration;

use beach_atlas_core::{check_quota, entry_size, CoreError, CoreResult, KeyValueStore};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// How long a writer waits for another connection's write lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// SQLite-backed key-value store
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    quota: Option<u64>,
}

impl Database {
    /// Create an in-memory database for testing.
    pub fn new_in_memory(quota: Option<u64>) -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| pool_error(&e))?;

        let db = Self { pool, quota };
        db.init_schema()?;
        Ok(db)
    }

    /// Open the database at the default location
    pub fn new(quota: Option<u64>) -> AppResult<Self> {
        Self::open(database_path()?, quota)
    }

    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>, quota: Option<u64>) -> AppResult<Self> {
        let db_path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path)
            .with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| pool_error(&e))?;

        let db = Self { pool, quota };
        db.init_schema()?;

        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| pool_error(&e))
    }

    fn connection(&self) -> CoreResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| CoreError::storage(format!("Failed to get connection: {}", e)))
    }
}

fn pool_error(e: &r2d2::Error) -> AppError {
    AppError::Persistence(CoreError::storage(format!(
        "Failed to get connection: {}",
        e
    )))
}

fn storage_error(e: rusqlite::Error) -> CoreError {
    CoreError::storage(e.to_string())
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let conn = self.connection()?;
        conn.query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(storage_error)
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut conn = self.connection()?;
        // Take the write lock up front so the quota check and the write
        // cannot interleave with another writer
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage_error)?;

        if self.quota.is_some() {
            let used: i64 = tx
                .query_row(
                    "SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
                     FROM local_storage",
                    [],
                    |row| row.get(0),
                )
                .map_err(storage_error)?;
            let previous: Option<String> = tx
                .query_row(
                    "SELECT value FROM local_storage WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_error)?;
            let previous = previous.map(|old| entry_size(key, &old)).unwrap_or(0);

            check_quota(
                key,
                used.max(0) as u64,
                previous,
                entry_size(key, value),
                self.quota,
            )?;
        }

        tx.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )
        .map_err(storage_error)?;
        tx.commit().map_err(storage_error)?;
        Ok(())
    }

    fn usage_bytes(&self) -> CoreResult<u64> {
        let conn = self.connection()?;
        let used: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
                 FROM local_storage",
                [],
                |row| row.get(0),
            )
            .map_err(storage_error)?;
        Ok(used.max(0) as u64)
    }

    fn quota_bytes(&self) -> Option<u64> {
        self.quota
    }

    fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.pool.get() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }
}
