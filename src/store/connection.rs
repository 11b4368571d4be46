use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

use crate::store::error::Result;

/// Configuration for the message store connection
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL host
    pub host: String,

    /// PostgreSQL port
    pub port: u16,

    /// Database name
    pub dbname: String,

    /// Username
    pub user: String,

    /// Password
    pub password: String,

    /// Maximum number of connections in the pool
    pub max_pool_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            port: 5432,
            dbname: "chatdb".to_string(),
            user: "user".to_string(),
            password: "password".to_string(),
            max_pool_size: 16,
        }
    }
}

impl StoreConfig {
    /// Read the connection parameters from the environment, falling back to
    /// the local-development defaults.
    ///
    /// Recognized variables: `POSTGRES_HOST`, `POSTGRES_USER`,
    /// `POSTGRES_PASSWORD`, `POSTGRES_DB`. The port is not
    /// environment-configurable.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "db".to_string()),
            user: std::env::var("POSTGRES_USER").unwrap_or_else(|_| "user".to_string()),
            password: std::env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "password".to_string()),
            dbname: std::env::var("POSTGRES_DB").unwrap_or_else(|_| "chatdb".to_string()),
            ..Default::default()
        }
    }

    /// Build a connection pool from this configuration.
    ///
    /// The pool is lazy: no connection is attempted until one is checked
    /// out.
    pub fn build_pool(&self) -> Result<Pool> {
        let mut cfg = tokio_postgres::Config::new();
        cfg.host(&self.host);
        cfg.port(self.port);
        cfg.dbname(&self.dbname);
        cfg.user(&self.user);
        cfg.password(&self.password);

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(cfg, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(self.max_pool_size)
            .runtime(Runtime::Tokio1)
            .build()?;

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.host, "db");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "chatdb");
        assert_eq!(config.user, "user");
        assert_eq!(config.password, "password");
        assert_eq!(config.max_pool_size, 16);
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("POSTGRES_HOST", "pg.internal");
        std::env::set_var("POSTGRES_USER", "relay");
        std::env::set_var("POSTGRES_PASSWORD", "secret");
        std::env::set_var("POSTGRES_DB", "relaydb");

        let config = StoreConfig::from_env();

        assert_eq!(config.host, "pg.internal");
        assert_eq!(config.user, "relay");
        assert_eq!(config.password, "secret");
        assert_eq!(config.dbname, "relaydb");
        // Port stays at the default regardless of the environment
        assert_eq!(config.port, 5432);

        std::env::remove_var("POSTGRES_HOST");
        std::env::remove_var("POSTGRES_USER");
        std::env::remove_var("POSTGRES_PASSWORD");
        std::env::remove_var("POSTGRES_DB");
    }

    #[test]
    fn test_build_pool_is_lazy() {
        // No database is listening here; building the pool must still
        // succeed because connections are only made on checkout.
        let config = StoreConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..Default::default()
        };

        assert!(config.build_pool().is_ok());
    }
}
