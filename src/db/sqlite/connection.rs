//! SQLite connection pool
//!
//! Each request checks out one pooled connection and returns it on drop.

use crate::error::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;";

/// Create a pool of connections to the database file at `path`
pub fn create_file_pool(path: &Path, size: u32) -> Result<SqlitePool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        // WAL lets readers proceed while a writer holds the lock
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
    });

    let pool = Pool::builder().max_size(size).build(manager)?;
    Ok(pool)
}

/// Create a single-connection pool over a private in-memory database.
///
/// The connection is never recycled, otherwise the data would be lost.
pub fn create_memory_pool() -> Result<SqlitePool> {
    let manager =
        SqliteConnectionManager::memory().with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)?;
    Ok(pool)
}
