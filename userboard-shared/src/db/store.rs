/// User storage used by the HTTP handlers
///
/// [`UserStore`] is the seam between request handling and the database.
/// [`MySqlStore`] is the real implementation: every call provisions a fresh
/// connection, runs exactly one statement and releases the connection.
///
/// # Example
///
/// ```no_run
/// use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};
/// use userboard_shared::db::store::{MySqlStore, UserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MySqlStore::new(DatabaseConfig::from_env()?, RetryPolicy::default());
/// store.ping().await?;
/// let users = store.list_users().await?;
/// # Ok(())
/// # }
/// ```

use crate::db::config::{DatabaseConfig, RetryPolicy};
use crate::db::provision::{acquire_connection, release};
use crate::db::ConnectionError;
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No live connection could be opened
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The statement failed on an open connection
    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Operations the handlers need from storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Checks that storage is reachable and live
    async fn ping(&self) -> Result<(), StoreError>;

    /// Lists every user in insertion order
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Inserts a user and returns its ID
    async fn add_user(&self, user: NewUser) -> Result<u64, StoreError>;
}

/// MySQL-backed store with one connection per call
pub struct MySqlStore {
    config: DatabaseConfig,
    policy: RetryPolicy,
}

impl MySqlStore {
    /// Creates a store for the given settings
    pub fn new(config: DatabaseConfig, policy: RetryPolicy) -> Self {
        Self { config, policy }
    }
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn ping(&self) -> Result<(), StoreError> {
        // acquire_connection already pings the fresh connection
        let conn = acquire_connection(&self.config, &self.policy).await?;
        release(conn).await;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = acquire_connection(&self.config, &self.policy).await?;
        let result = User::list_all(&mut conn).await;
        release(conn).await;

        Ok(result?)
    }

    async fn add_user(&self, user: NewUser) -> Result<u64, StoreError> {
        let mut conn = acquire_connection(&self.config, &self.policy).await?;
        let result = User::insert(&mut conn, user).await;
        release(conn).await;

        Ok(result?)
    }
}
