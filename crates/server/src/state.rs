//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::auth::{PasswordHasher, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The password hasher and token service are built once here from the
    /// auth configuration and shared by every request.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let hasher = PasswordHasher::new(config.auth.password_salt.clone());
        let tokens = TokenService::new(config.auth.signing_key.clone(), config.auth.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                hasher,
                tokens,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the password hasher.
    #[must_use]
    pub fn hasher(&self) -> &PasswordHasher {
        &self.inner.hasher
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
