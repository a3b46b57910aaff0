//! Server configuration
//!
//! Values come from `ADMIN_*` environment variables (a `.env` file is loaded
//! first by the binary). Every value has a default.

use crate::error::{AppError, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_PATH: &str = "ecommerce_admin.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_MAX_PERIODS: u32 = 366;

/// HTTP server and store configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub pool_size: u32,
    /// Upper bound on the number of periods a bucketing request may ask for
    pub max_periods: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            pool_size: DEFAULT_POOL_SIZE,
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            host: lookup("ADMIN_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "ADMIN_PORT", defaults.port)?,
            database_path: lookup("ADMIN_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            pool_size: parse_var(&lookup, "ADMIN_POOL_SIZE", defaults.pool_size)?,
            max_periods: parse_var(&lookup, "ADMIN_MAX_PERIODS", defaults.max_periods)?,
        };

        if config.pool_size == 0 {
            return Err(AppError::Config("ADMIN_POOL_SIZE must be at least 1".to_string()));
        }
        if config.max_periods == 0 {
            return Err(AppError::Config("ADMIN_MAX_PERIODS must be at least 1".to_string()));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}
