/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. It is built once in `main` and shared
/// read-only with every handler.
///
/// # Environment Variables
///
/// - `APP_HOST`: Host to bind to (default: 0.0.0.0)
/// - `APP_PORT`: Port to bind to (default: 5000)
/// - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`: see
///   [`userboard_shared::db::config::DatabaseConfig`]
/// - `DB_CONNECT_MAX_ATTEMPTS`, `DB_CONNECT_RETRY_DELAY_SECS`: see
///   [`userboard_shared::db::config::RetryPolicy`]
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use userboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database connection settings
    pub database: DatabaseConfig,

    /// Retry policy for opening connections
    pub retry: RetryPolicy,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but has an invalid value.
    /// Missing variables fall back to their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let host = lookup("APP_HOST").unwrap_or(defaults.host);
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("APP_PORT must be a valid port: {}", e))?,
            None => defaults.port,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig::from_vars(&lookup)?,
            retry: RetryPolicy::from_vars(&lookup)?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
