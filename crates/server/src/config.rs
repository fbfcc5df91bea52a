//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TICKLIST_DATABASE_URL` - `PostgreSQL` connection string
//! - `TICKLIST_SIGNING_KEY` - Token signing key (min 32 chars, high entropy)
//! - `TICKLIST_PASSWORD_SALT` - Salt mixed into password digests (high entropy)
//!
//! ## Optional
//! - `TICKLIST_HOST` - Bind address (default: 127.0.0.1)
//! - `TICKLIST_PORT` - Listen port (default: 8080)
//! - `TICKLIST_TOKEN_TTL_HOURS` - Token lifetime in hours (default: 12)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SIGNING_KEY_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Authentication configuration.
///
/// Both fields are deployment-wide: the signing key authenticates every
/// issued token, and the salt goes into every stored password digest.
/// Changing the salt invalidates all stored credentials.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key for signing bearer tokens
    pub signing_key: SecretString,
    /// Salt prepended to passwords before hashing
    pub password_salt: SecretString,
    /// How long issued tokens stay valid
    pub token_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TICKLIST_DATABASE_URL")?;
        let host = get_env_or_default("TICKLIST_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TICKLIST_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TICKLIST_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TICKLIST_PORT".to_string(), e.to_string()))?;

        let auth = AuthConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            auth,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let signing_key = get_validated_secret("TICKLIST_SIGNING_KEY")?;
        validate_signing_key(&signing_key, "TICKLIST_SIGNING_KEY")?;

        let password_salt = get_validated_secret("TICKLIST_PASSWORD_SALT")?;

        let ttl_hours = get_env_or_default("TICKLIST_TOKEN_TTL_HOURS", "12")
            .parse::<i64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TICKLIST_TOKEN_TTL_HOURS".to_string(), e.to_string())
            })?;
        if ttl_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TICKLIST_TOKEN_TTL_HOURS".to_string(),
                "must be a positive number of hours".to_string(),
            ));
        }

        Ok(Self {
            signing_key,
            password_salt,
            token_ttl: Duration::hours(ttl_hours),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., TICKLIST_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by Fly.io postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a signing key meets minimum length requirements.
fn validate_signing_key(key: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = key.expose_secret();
    if value.len() < MIN_SIGNING_KEY_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SIGNING_KEY_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
