//! Todo list and item routes.
//!
//! Every handler here authenticates through the [`AuthUser`] extractor and
//! only ever sees rows the caller owns. A list or item belonging to another
//! user 404s exactly like one that does not exist.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use ticklist_core::{ItemId, ListId};

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NewItem, NewList, TodoItem, TodoList, UpdateItem, UpdateList};
use crate::services::todos::TodoService;
use crate::state::AppState;

/// Response from creating a list.
#[derive(Debug, Serialize)]
pub struct CreateListResponse {
    pub id: ListId,
}

/// Response from creating an item.
#[derive(Debug, Serialize)]
pub struct CreateItemResponse {
    pub id: ItemId,
}

/// Collection envelope for list queries.
#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub data: Vec<TodoList>,
}

/// Collection envelope for item queries.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub data: Vec<TodoItem>,
}

/// Response for operations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

// ============================================================================
// Lists
// ============================================================================

/// Create a new todo list.
///
/// POST /api/lists
///
/// # Errors
///
/// Returns 500 if the insert fails.
pub async fn create_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<NewList>,
) -> Result<Json<CreateListResponse>> {
    let todos = TodoService::new(state.pool());
    let id = todos.create_list(user_id, &req).await?;

    tracing::info!(user_id = %user_id, list_id = %id, "list created");

    Ok(Json(CreateListResponse { id }))
}

/// Get all lists owned by the caller.
///
/// GET /api/lists
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn get_lists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ListsResponse>> {
    let todos = TodoService::new(state.pool());
    let data = todos.get_lists(user_id).await?;

    Ok(Json(ListsResponse { data }))
}

/// Get one list owned by the caller.
///
/// GET /api/lists/{id}
///
/// # Errors
///
/// Returns 404 if the list does not exist or belongs to someone else.
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<ListId>,
) -> Result<Json<TodoList>> {
    let todos = TodoService::new(state.pool());
    let list = todos.get_list(user_id, list_id).await?;

    Ok(Json(list))
}

/// Update a list owned by the caller.
///
/// PUT /api/lists/{id}
///
/// # Errors
///
/// Returns 400 if the body carries no fields, 404 if the list does not
/// exist or belongs to someone else.
pub async fn update_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<ListId>,
    Json(patch): Json<UpdateList>,
) -> Result<Json<StatusResponse>> {
    if patch.is_empty() {
        return Err(AppError::BadRequest(
            "update request has no values".to_string(),
        ));
    }

    let todos = TodoService::new(state.pool());
    todos.update_list(user_id, list_id, &patch).await?;

    Ok(Json(StatusResponse::ok()))
}

/// Delete a list owned by the caller.
///
/// The membership rows cascade away with the list, so its items stop being
/// reachable through any read path.
///
/// DELETE /api/lists/{id}
///
/// # Errors
///
/// Returns 404 if the list does not exist or belongs to someone else.
pub async fn delete_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<ListId>,
) -> Result<Json<StatusResponse>> {
    let todos = TodoService::new(state.pool());
    let deleted = todos.delete_list(user_id, list_id).await?;
    if !deleted {
        return Err(AppError::NotFound("list not found".to_string()));
    }

    tracing::info!(user_id = %user_id, list_id = %list_id, "list deleted");

    Ok(Json(StatusResponse::ok()))
}

// ============================================================================
// Items
// ============================================================================

/// Create a new item in a list owned by the caller.
///
/// POST /api/lists/{id}/items
///
/// # Errors
///
/// Returns 404 if the list does not exist or belongs to someone else.
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<ListId>,
    Json(req): Json<NewItem>,
) -> Result<Json<CreateItemResponse>> {
    let todos = TodoService::new(state.pool());
    let id = todos.create_item(user_id, list_id, &req).await?;

    tracing::info!(user_id = %user_id, list_id = %list_id, item_id = %id, "item created");

    Ok(Json(CreateItemResponse { id }))
}

/// Get all items in a list owned by the caller.
///
/// GET /api/lists/{id}/items
///
/// Returns an empty collection for a list the caller does not own.
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn get_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<ListId>,
) -> Result<Json<ItemsResponse>> {
    let todos = TodoService::new(state.pool());
    let data = todos.get_items(user_id, list_id).await?;

    Ok(Json(ItemsResponse { data }))
}

/// Get one item from a list owned by the caller.
///
/// GET /api/items/{id}
///
/// # Errors
///
/// Returns 404 if the item does not exist or lives in a list the caller
/// does not own.
pub async fn get_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<ItemId>,
) -> Result<Json<TodoItem>> {
    let todos = TodoService::new(state.pool());
    let item = todos.get_item(user_id, item_id).await?;

    Ok(Json(item))
}

/// Update an item in a list owned by the caller.
///
/// PUT /api/items/{id}
///
/// # Errors
///
/// Returns 400 if the body carries no fields, 404 if the item does not
/// exist or lives in a list the caller does not own.
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<ItemId>,
    Json(patch): Json<UpdateItem>,
) -> Result<Json<StatusResponse>> {
    if patch.is_empty() {
        return Err(AppError::BadRequest(
            "update request has no values".to_string(),
        ));
    }

    let todos = TodoService::new(state.pool());
    todos.update_item(user_id, item_id, &patch).await?;

    Ok(Json(StatusResponse::ok()))
}

/// Delete an item from a list owned by the caller.
///
/// DELETE /api/items/{id}
///
/// # Errors
///
/// Returns 404 if the item does not exist or lives in a list the caller
/// does not own.
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<ItemId>,
) -> Result<Json<StatusResponse>> {
    let todos = TodoService::new(state.pool());
    let deleted = todos.delete_item(user_id, item_id).await?;
    if !deleted {
        return Err(AppError::NotFound("item not found".to_string()));
    }

    tracing::info!(user_id = %user_id, item_id = %item_id, "item deleted");

    Ok(Json(StatusResponse::ok()))
}
