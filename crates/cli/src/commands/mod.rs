//! CLI command implementations.

pub mod migrate;
pub mod user;

/// Resolve the database URL the same way the server does.
///
/// Prefers `TICKLIST_DATABASE_URL`, falls back to `DATABASE_URL`.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("TICKLIST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
