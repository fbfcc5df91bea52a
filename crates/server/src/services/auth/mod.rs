//! Authentication service.
//!
//! Handles account creation, credential checks, and bearer token issue
//! and parsing.

mod error;
mod hasher;
mod token;

pub use error::AuthError;
pub use hasher::PasswordHasher;
pub use token::{TokenError, TokenService};

use sqlx::PgPool;

use ticklist_core::{UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::NewUser;

/// Authentication service.
///
/// Owns the account lifecycle: registration, credential verification,
/// and the bearer tokens that stand in for credentials afterwards.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    hasher: &'a PasswordHasher,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        hasher: &'a PasswordHasher,
        tokens: &'a TokenService,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            hasher,
            tokens,
        }
    }

    /// Register a new user and return the assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username fails validation.
    /// Returns `AuthError::DuplicateUsername` if the username is taken.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<UserId, AuthError> {
        let username = Username::parse(&new_user.username)?;

        let digest = self.hasher.hash(&new_user.password);

        let id = self
            .users
            .create(&new_user.name, &username, &digest)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername,
                other => AuthError::Repository(other),
            })?;

        Ok(id)
    }

    /// Check a username/password pair and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair matches no user.
    pub async fn generate_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        // A username that fails validation cannot match any account
        let Ok(username) = Username::parse(username) else {
            return Err(AuthError::InvalidCredentials);
        };

        let digest = self.hasher.hash(password);

        let user = self
            .users
            .get_by_credentials(&username, &digest)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(self.tokens.issue(user.id)?)
    }

    /// Verify a bearer token and return the user ID it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` wrapping the verification failure.
    pub fn parse_token(&self, token: &str) -> Result<UserId, AuthError> {
        Ok(self.tokens.verify(token)?)
    }
}
