/// Database connection settings
///
/// Holds everything the provisioner needs to open a MySQL connection and the
/// retry policy it follows while doing so. Both are built once at startup
/// (usually from environment variables) and passed around by reference.
///
/// # Environment Variables
///
/// - `DB_HOST`: Database host (default: mysql)
/// - `DB_PORT`: Database port (default: 3306)
/// - `DB_USER`: Database user (default: root)
/// - `DB_PASSWORD`: Database password (default: rootpassword)
/// - `DB_NAME`: Database name (default: flaskdb)
/// - `DB_CONNECT_MAX_ATTEMPTS`: Connection attempts before giving up (default: 5)
/// - `DB_CONNECT_RETRY_DELAY_SECS`: Fixed delay between attempts (default: 2)
///
/// # Example
///
/// ```no_run
/// use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};
///
/// # fn example() -> Result<(), userboard_shared::db::ConnectionError> {
/// let database = DatabaseConfig::from_env()?;
/// let retry = RetryPolicy::from_env()?;
/// println!("Connecting to {} ({} attempts)", database.display_target(), retry.max_attempts());
/// # Ok(())
/// # }
/// ```

use crate::db::ConnectionError;
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::fmt;
use std::time::Duration;

/// Default number of connection attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default delay between connection attempts (2 seconds)
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// MySQL connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,

    /// Database port
    pub port: u16,

    /// Database user
    pub user: String,

    /// Database password
    ///
    /// Never serialized and never printed by `Debug`.
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Database (schema) name
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "mysql".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: "rootpassword".to_string(),
            database: "flaskdb".to_string(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseConfig {
    /// Loads database settings from environment variables
    ///
    /// Loads a `.env` file first if one is present. Every variable has a
    /// default, so this only fails when `DB_PORT` is set but is not a valid port.
    pub fn from_env() -> Result<Self, ConnectionError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds database settings from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConnectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("DB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConnectionError::Config(format!("DB_PORT must be a valid port: {}", e))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
        })
    }

    /// Returns sqlx connect options for these settings
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// Returns `user@host:port/database` for logging (no password)
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

/// Bounded retry policy for opening connections
///
/// A fixed number of attempts with a fixed delay between them. No backoff,
/// no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a retry policy
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::InvalidPolicy` if `max_attempts` is zero.
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, ConnectionError> {
        if max_attempts == 0 {
            return Err(ConnectionError::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_attempts,
            delay,
        })
    }

    /// Loads the retry policy from environment variables
    pub fn from_env() -> Result<Self, ConnectionError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the retry policy from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConnectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_attempts = match lookup("DB_CONNECT_MAX_ATTEMPTS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ConnectionError::Config(format!("DB_CONNECT_MAX_ATTEMPTS must be an integer: {}", e))
            })?,
            None => DEFAULT_MAX_ATTEMPTS,
        };

        let delay = match lookup("DB_CONNECT_RETRY_DELAY_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|e| {
                ConnectionError::Config(format!(
                    "DB_CONNECT_RETRY_DELAY_SECS must be an integer: {}",
                    e
                ))
            })?),
            None => DEFAULT_RETRY_DELAY,
        };

        Self::new(max_attempts, delay)
    }

    /// Maximum number of connection attempts (always >= 1)
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between consecutive attempts
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::from_vars(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "mysql");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "root");
        assert_eq!(config.password, "rootpassword");
        assert_eq!(config.database, "flaskdb");
    }

    #[test]
    fn test_database_config_overrides() {
        let config = DatabaseConfig::from_vars(lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "3307"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "users"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.user, "app");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.database, "users");
    }

    #[test]
    fn test_database_config_invalid_port() {
        let result = DatabaseConfig::from_vars(lookup_from(&[("DB_PORT", "not-a-port")]));
        assert!(matches!(result, Err(ConnectionError::Config(_))));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = DatabaseConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_display_target() {
        let config = DatabaseConfig::default();
        assert_eq!(config.display_target(), "root@mysql:3306/flaskdb");
    }

    #[test]
    fn test_retry_policy_defaults() {
        let policy = RetryPolicy::from_vars(lookup_from(&[])).unwrap();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.delay(), Duration::from_secs(2));
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn test_retry_policy_overrides() {
        let policy = RetryPolicy::from_vars(lookup_from(&[
            ("DB_CONNECT_MAX_ATTEMPTS", "3"),
            ("DB_CONNECT_RETRY_DELAY_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay(), Duration::ZERO);
    }

    #[test]
    fn test_retry_policy_rejects_zero_attempts() {
        assert!(matches!(
            RetryPolicy::new(0, Duration::from_secs(1)),
            Err(ConnectionError::InvalidPolicy(_))
        ));
        assert!(matches!(
            RetryPolicy::from_vars(lookup_from(&[("DB_CONNECT_MAX_ATTEMPTS", "0")])),
            Err(ConnectionError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_retry_policy_invalid_number() {
        let result = RetryPolicy::from_vars(lookup_from(&[("DB_CONNECT_RETRY_DELAY_SECS", "soon")]));
        assert!(matches!(result, Err(ConnectionError::Config(_))));
    }
}
