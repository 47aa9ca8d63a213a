//! Connection settings, usually loaded from the environment or a `.env` file.

use std::env;

use crate::{Error, Result};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`, loading `.env` first
    /// when one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let database_url = env::var(DATABASE_URL)
            .map_err(|_| Error::Config(format!("{DATABASE_URL} is not set")))?;

        let max_connections = match env::var(DATABASE_MAX_CONNECTIONS) {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|e| {
                Error::Config(format!("{DATABASE_MAX_CONNECTIONS}={raw:?}: {e}"))
            })?,
            Err(_) => Self::DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self::new(database_url).max_connections(max_connections))
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("sqlite::memory:");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, Config::DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_max_connections_floor() {
        let config = Config::new("sqlite::memory:").max_connections(0);
        assert_eq!(config.max_connections, 1);
    }
}
