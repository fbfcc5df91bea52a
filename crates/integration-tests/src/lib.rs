//! Integration tests for Ticklist.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p ticklist-cli -- migrate
//!
//! # Start the server
//! cargo run -p ticklist-server
//!
//! # Run integration tests against it
//! cargo test -p ticklist-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Account creation and token tests
//! - `todo_items` - List and item CRUD, ownership, and atomicity tests
//!
//! Every test is `#[ignore]`d by default because each one needs a running
//! server or a migrated database. The tests read `TICKLIST_BASE_URL`
//! (default `http://localhost:8080`) and `TICKLIST_DATABASE_URL`.
