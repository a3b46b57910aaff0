//! SQLite database module

pub mod category;
mod connection;
pub mod inventory;
mod migrations;
pub mod models;
pub mod product;
pub mod sales;
pub mod seed;

use crate::error::Result;
pub use connection::{PooledConn, SqlitePool};
pub use models::*;
use std::path::Path;

/// SQLite database handle backed by a connection pool
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Open (or create) the database file and apply migrations
    pub fn new(path: &Path, pool_size: u32) -> Result<Self> {
        let pool = connection::create_file_pool(path, pool_size)?;
        let db = Self { pool };
        db.run_migrations()?;

        tracing::info!("Opened database {:?} (pool size {})", path, pool_size);
        Ok(db)
    }

    /// Private in-memory database, mainly for tests
    pub fn in_memory() -> Result<Self> {
        let pool = connection::create_memory_pool()?;
        let db = Self { pool };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;
        migrations::run_migrations(&conn)
    }

    /// Check out a connection for the duration of one request.
    ///
    /// The connection goes back to the pool when dropped.
    pub fn conn(&self) -> Result<PooledConn> {
        Ok(self.pool.get()?)
    }

    /// Round-trip a trivial query
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}
