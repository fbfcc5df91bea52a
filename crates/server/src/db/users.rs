//! User repository for database operations.
//!
//! Credentials never leave this module as anything but an opaque digest:
//! lookups compare the stored digest inside the query itself.

use sqlx::PgPool;

use ticklist_core::{UserId, Username};

use super::RepositoryError;
use crate::models::user::User;

/// Database row for a user, before domain validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    username: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            username,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user with a precomputed password digest.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        username: &Username,
        password_hash: &str,
    ) -> Result<UserId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO users (name, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(UserId::new(id))
    }

    /// Look up a user by username and password digest.
    ///
    /// Returns `None` when the username is unknown or the digest does not
    /// match; callers cannot tell the two cases apart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_credentials(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, username
            FROM users
            WHERE username = $1 AND password_hash = $2
            ",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_id(&self, user_id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, username
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}
