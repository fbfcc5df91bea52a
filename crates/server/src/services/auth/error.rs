//! Error types for authentication flows.

use ticklist_core::UsernameError;

use crate::db::RepositoryError;
use crate::services::auth::TokenError;

/// Errors that can occur during sign-up, sign-in, or token parsing.
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// The requested username does not pass validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// The username is already taken by another account.
    #[error("username already exists")]
    DuplicateUsername,

    /// No account matches the supplied username and password.
    ///
    /// Deliberately does not say which of the two was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A token could not be issued or verified.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The database failed underneath the auth flow.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
