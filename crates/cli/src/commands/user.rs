//! User account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a user account
//! ticklist user create -n "Alice Smith" -u alice -p "correct horse battery staple"
//!
//! # Look up a user account
//! ticklist user show 1
//! ```
//!
//! # Environment Variables
//!
//! - `TICKLIST_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//! - `TICKLIST_PASSWORD_SALT` - Salt for password digests; must match the
//!   server's, or the created account cannot sign in

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use ticklist_core::{UserId, Username, UsernameError};
use ticklist_server::db::{RepositoryError, UserRepository};
use ticklist_server::services::auth::PasswordHasher;

/// Errors that can occur during user account operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// User already exists.
    #[error("User already exists with username: {0}")]
    UserExists(String),

    /// No user with the given ID.
    #[error("No user with ID: {0}")]
    NotFound(i32),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Create a new user account.
///
/// The password is digested with the deployment salt exactly as the server
/// does it, so accounts created here can sign in over HTTP.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `UserError` if validation fails, configuration is missing, or
/// the username is already taken.
pub async fn create(name: &str, username: &str, password: &str) -> Result<i32, UserError> {
    dotenvy::dotenv().ok();

    // Validate the username before touching the database
    let username = Username::parse(username)?;

    let salt = std::env::var("TICKLIST_PASSWORD_SALT")
        .map_err(|_| UserError::MissingEnvVar("TICKLIST_PASSWORD_SALT"))?;
    let hasher = PasswordHasher::new(SecretString::from(salt));

    let database_url =
        super::database_url().ok_or(UserError::MissingEnvVar("TICKLIST_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating user: {}", username);

    let digest = hasher.hash(password);
    let id = UserRepository::new(&pool)
        .create(name, &username, &digest)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UserExists(username.to_string()),
            other => UserError::Repository(other),
        })?;

    tracing::info!("User created successfully! ID: {}, Username: {}", id, username);

    Ok(id.as_i32())
}

/// Show a user account by ID.
///
/// # Errors
///
/// Returns `UserError::NotFound` if no account has the given ID.
pub async fn show(id: i32) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(UserError::MissingEnvVar("TICKLIST_DATABASE_URL"))?;
    let pool = PgPool::connect(&database_url).await?;

    let user = UserRepository::new(&pool)
        .get_by_id(UserId::new(id))
        .await?
        .ok_or(UserError::NotFound(id))?;

    tracing::info!("ID: {}", user.id);
    tracing::info!("Name: {}", user.name);
    tracing::info!("Username: {}", user.username);

    Ok(())
}
