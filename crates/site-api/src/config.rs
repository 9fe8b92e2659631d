//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Default database name when `DB_NAME` is unset.
pub const DEFAULT_DB_NAME: &str = "alsawda_warehouses";

/// Site API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Maximum pooled database connections.
    pub pool_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SITE_ADDR` | Server bind address | `0.0.0.0:8001` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:<DB_NAME>.db?mode=rwc` |
    /// | `DB_NAME` | Database name for the default URL | `alsawda_warehouses` |
    /// | `DB_POOL_SIZE` | Connection pool size | `20` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SITE_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8001".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let pool_size = match env::var("DB_POOL_SIZE") {
            Ok(raw) => raw
                .parse()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidPoolSize(raw))?,
            Err(_) => 20,
        };

        Ok(Self {
            addr,
            database_url: database_url_from_env(),
            pool_size,
        })
    }
}

/// `DATABASE_URL`, or a file URL derived from `DB_NAME`.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| {
        let name = env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());
        default_database_url(&name)
    })
}

fn default_database_url(db_name: &str) -> String {
    format!("sqlite:{db_name}.db?mode=rwc")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SITE_ADDR format")]
    InvalidAddr,

    #[error("DB_POOL_SIZE must be a positive integer, got {0:?}")]
    InvalidPoolSize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url() {
        assert_eq!(
            default_database_url(DEFAULT_DB_NAME),
            "sqlite:alsawda_warehouses.db?mode=rwc"
        );
    }
}
