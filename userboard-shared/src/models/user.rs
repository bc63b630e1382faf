/// User model and database operations
///
/// Users are only ever inserted and listed. There is no update or delete.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};
/// use userboard_shared::db::provision::{acquire_connection, release};
/// use userboard_shared::models::user::{NewUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig::from_env()?;
/// let mut conn = acquire_connection(&config, &RetryPolicy::default()).await?;
///
/// let id = User::insert(
///     &mut conn,
///     NewUser {
///         name: "Alice".to_string(),
///         email: "alice@example.com".to_string(),
///     },
/// )
/// .await?;
///
/// let users = User::list_all(&mut conn).await?;
/// println!("Inserted {}, now {} users", id, users.len());
///
/// release(conn).await;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnection;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Auto-increment row ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Email address (stored as given, no format check)
    pub email: String,
}

/// Input for inserting a user
///
/// Callers are expected to have checked that both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl User {
    /// Lists every user in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (e.g. missing table, lost connection)
    pub async fn list_all(conn: &mut MySqlConnection) -> Result<Vec<Self>, sqlx::Error> {
        // CAST keeps decoding to u64 working when the id column is signed
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT CAST(id AS UNSIGNED) AS id, name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(users)
    }

    /// Inserts a user and returns the generated ID
    ///
    /// The statement runs in autocommit mode, so it is committed as soon as
    /// it succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(conn: &mut MySqlConnection, data: NewUser) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(data.name)
            .bind(data.email)
            .execute(&mut *conn)
            .await?;

        Ok(result.last_insert_id())
    }

    /// Counts stored users
    pub async fn count(conn: &mut MySqlConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
