//! Salted password digests.
//!
//! Passwords are stored as `hex(SHA-256(salt || password))` with a single
//! deployment-wide salt from configuration. This is deliberately a fast,
//! deterministic digest rather than a tunable KDF: equality checks happen
//! inside SQL lookups, which requires the digest for a given input to be
//! stable. Swapping in a per-user-salt KDF such as argon2 means moving the
//! comparison out of the query and is a schema migration, not a drop-in.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Computes salted password digests for storage and lookup.
pub struct PasswordHasher {
    salt: SecretString,
}

impl PasswordHasher {
    /// Create a hasher with a deployment-wide salt.
    #[must_use]
    pub const fn new(salt: SecretString) -> Self {
        Self { salt }
    }

    /// Digest a plaintext password.
    ///
    /// Deterministic for a fixed salt: the same plaintext always produces
    /// the same 64-character lowercase hex string.
    #[must_use]
    pub fn hash(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.expose_secret().as_bytes());
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}
