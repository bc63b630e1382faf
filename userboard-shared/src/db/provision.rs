/// Connection provisioning with bounded retry
///
/// Every call opens a brand-new MySQL connection. There is no pool: the caller
/// owns the returned connection and it is closed when dropped, so release is
/// guaranteed on every exit path. [`release`] closes it gracefully on the
/// happy path.
///
/// An attempt only counts as successful once the fresh connection answers a
/// ping. A connection that opens but fails the ping is dropped and the attempt
/// is retried like any other failure.
///
/// # Example
///
/// ```no_run
/// use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};
/// use userboard_shared::db::provision::{acquire_connection, release};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig::from_env()?;
/// let policy = RetryPolicy::default();
///
/// let conn = acquire_connection(&config, &policy).await?;
/// release(conn).await;
/// # Ok(())
/// # }
/// ```

use crate::db::config::{DatabaseConfig, RetryPolicy};
use crate::db::ConnectionError;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Opens and checks connections for the provisioner
///
/// The MySQL implementation is [`MySqlConnector`]. Tests substitute scripted
/// connectors.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connection type handed to the caller
    type Connection: Send;

    /// Opens a new connection
    async fn connect(&self) -> Result<Self::Connection, sqlx::Error>;

    /// Verifies that an opened connection is usable
    async fn ping(&self, conn: &mut Self::Connection) -> Result<(), sqlx::Error>;
}

/// Connector for a MySQL server
pub struct MySqlConnector {
    options: MySqlConnectOptions,
}

impl MySqlConnector {
    /// Creates a connector for the given settings
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
        }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    type Connection = MySqlConnection;

    async fn connect(&self) -> Result<MySqlConnection, sqlx::Error> {
        self.options.connect().await
    }

    async fn ping(&self, conn: &mut MySqlConnection) -> Result<(), sqlx::Error> {
        conn.ping().await
    }
}

/// Opens connections, retrying according to a [`RetryPolicy`]
pub struct Provisioner<C> {
    connector: C,
    policy: RetryPolicy,
}

impl<C: Connector> Provisioner<C> {
    /// Creates a provisioner
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self { connector, policy }
    }

    /// Opens a live connection
    ///
    /// Makes up to `max_attempts` attempts, sleeping `delay` between them.
    /// There is no sleep after the final attempt.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::Exhausted` carrying the last underlying
    /// error when every attempt fails.
    pub async fn acquire(&self) -> Result<C::Connection, ConnectionError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            match self.attempt().await {
                Ok(conn) => {
                    info!(attempt, "Successfully connected to database");
                    return Ok(conn);
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        "Database connection attempt failed"
                    );

                    if attempt >= max_attempts {
                        error!(attempts = attempt, "Giving up on database connection");
                        return Err(ConnectionError::Exhausted {
                            attempts: attempt,
                            source: e,
                        });
                    }

                    sleep(self.policy.delay()).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self) -> Result<C::Connection, sqlx::Error> {
        let mut conn = self.connector.connect().await?;
        self.connector.ping(&mut conn).await?;
        Ok(conn)
    }
}

/// Opens a live MySQL connection for `config`, retrying per `policy`
pub async fn acquire_connection(
    config: &DatabaseConfig,
    policy: &RetryPolicy,
) -> Result<MySqlConnection, ConnectionError> {
    debug!(target_db = %config.display_target(), "Acquiring database connection");
    Provisioner::new(MySqlConnector::new(config), *policy)
        .acquire()
        .await
}

/// Gracefully closes a connection
///
/// Close failures are logged and otherwise ignored; the socket is gone
/// either way.
pub async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        debug!(error = %e, "Error while closing database connection");
    }
}
