/// Database layer for Userboard
///
/// # Modules
///
/// - `config`: Connection settings and the retry policy, loaded from the environment
/// - `provision`: Opens one live connection per call with bounded retry
/// - `store`: The `UserStore` seam used by the HTTP handlers
/// - Models are in the `models` module at crate root level
///
/// There is no pool: each request opens its own connection and
/// drops it when done.
///
/// # Example
///
/// ```no_run
/// use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};
/// use userboard_shared::db::provision::{acquire_connection, release};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let conn = acquire_connection(&config, &RetryPolicy::default()).await?;
///     release(conn).await;
///     Ok(())
/// }
/// ```

pub mod config;
pub mod provision;
pub mod store;

use thiserror::Error;

/// Errors raised while configuring or opening database connections
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Every connection attempt failed; carries the last underlying error
    #[error("{source} (gave up after {attempts} attempt(s))")]
    Exhausted {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    /// Retry policy cannot be satisfied
    #[error("Invalid retry policy: {0}")]
    InvalidPolicy(String),

    /// Configuration value could not be parsed
    #[error("Database configuration error: {0}")]
    Config(String),
}
