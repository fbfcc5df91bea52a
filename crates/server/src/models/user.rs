//! User domain types.

use serde::Deserialize;

use ticklist_core::{UserId, Username};

/// A registered account (domain type).
///
/// The password digest is never part of the domain type. It stays inside
/// the repository layer and only crosses it as an opaque comparison value.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique login name.
    pub username: Username,
}

/// Sign-up request payload.
///
/// The username is validated by the auth service before it reaches the
/// database. No `Debug` impl so the plaintext password cannot leak into logs.
#[derive(Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Requested login name.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}
