//! HTTP route handlers for the todo API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Auth
//! POST /auth/sign-up           - Create an account
//! POST /auth/sign-in           - Exchange credentials for a bearer token
//!
//! # Todo lists (bearer token required)
//! POST   /api/lists            - Create a list
//! GET    /api/lists            - All lists owned by the caller
//! GET    /api/lists/{id}       - One list
//! PUT    /api/lists/{id}       - Update a list (partial body)
//! DELETE /api/lists/{id}       - Delete a list (items become unreachable)
//!
//! # Todo items (bearer token required)
//! POST   /api/lists/{id}/items - Create an item in a list
//! GET    /api/lists/{id}/items - All items in a list
//! GET    /api/items/{id}       - One item
//! PUT    /api/items/{id}       - Update an item (partial body)
//! DELETE /api/items/{id}       - Delete an item
//! ```

pub mod auth;
pub mod todos;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in))
}

/// Create the todo API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/lists", post(todos::create_list).get(todos::get_lists))
        .route(
            "/lists/{id}",
            get(todos::get_list)
                .put(todos::update_list)
                .delete(todos::delete_list),
        )
        .route(
            "/lists/{id}/items",
            post(todos::create_item).get(todos::get_items),
        )
        .route(
            "/items/{id}",
            get(todos::get_item)
                .put(todos::update_item)
                .delete(todos::delete_item),
        )
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}
