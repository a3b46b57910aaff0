//! Application state management

use crate::config::ServerConfig;
use crate::db::SqliteDb;
use crate::error::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// State shared by all request handlers.
///
/// Holds no per-request data; every request checks out its own connection.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SqliteDb>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Open the configured database and build the state
    pub fn new(config: ServerConfig) -> Result<Self> {
        let db = SqliteDb::new(&config.database_path, config.pool_size)?;
        Ok(Self::with_db(db, config))
    }

    pub fn with_db(db: SqliteDb, config: ServerConfig) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }

    /// Current UTC calendar date, the anchor for period bucketing
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
