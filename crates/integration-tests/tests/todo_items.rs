//! Integration tests for todo list and item management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p ticklist-cli -- migrate)
//! - The server running (cargo run -p ticklist-server)
//!
//! The atomicity tests at the bottom talk to the database directly and only
//! need `TICKLIST_DATABASE_URL`.
//!
//! Run with: cargo test -p ticklist-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use ticklist_core::ListId;
use ticklist_server::db::{ItemRepository, RepositoryError};
use ticklist_server::models::NewItem;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("TICKLIST_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Test helper: Create a fresh account and return a bearer token for it.
async fn bearer_token(client: &Client, prefix: &str) -> String {
    let username = format!("{prefix}-{}", Uuid::new_v4().simple());
    let password = "integration test password";

    let resp = client
        .post(format!("{}/auth/sign-up", base_url()))
        .json(&json!({
            "name": prefix,
            "username": username,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to sign up");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{}/auth/sign-in", base_url()))
        .json(&json!({
            "username": username,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to sign in");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse sign-in response");
    body.get("token")
        .and_then(Value::as_str)
        .expect("sign-in response missing token")
        .to_string()
}

/// Test helper: Create a list via the API and return its id.
async fn create_list(client: &Client, token: &str, title: &str) -> i64 {
    let resp = client
        .post(format!("{}/api/lists", base_url()))
        .bearer_auth(token)
        .json(&json!({ "title": title }))
        .send()
        .await
        .expect("Failed to create list");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp
        .json()
        .await
        .expect("Failed to parse create-list response");
    body.get("id")
        .and_then(Value::as_i64)
        .expect("create-list response missing id")
}

/// Test helper: Create an item via the API and return its id.
async fn create_item(client: &Client, token: &str, list_id: i64, title: &str) -> i64 {
    let resp = client
        .post(format!("{}/api/lists/{list_id}/items", base_url()))
        .bearer_auth(token)
        .json(&json!({ "title": title }))
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp
        .json()
        .await
        .expect("Failed to parse create-item response");
    body.get("id")
        .and_then(Value::as_i64)
        .expect("create-item response missing id")
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_full_todo_scenario() {
    let client = Client::new();
    let base_url = base_url();
    let token = bearer_token(&client, "scenario").await;

    // Create a list and put one item in it
    let list_id = create_list(&client, &token, "Groceries").await;
    let item_id = create_item(&client, &token, list_id, "milk").await;

    // The item shows up in the list, not yet done
    let resp = client
        .get(format!("{base_url}/api/lists/{list_id}/items"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get items");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse items response");
    let items = body
        .get("data")
        .and_then(Value::as_array)
        .expect("items response missing data");
    let milk = items
        .iter()
        .find(|i| i.get("id").and_then(Value::as_i64) == Some(item_id))
        .expect("created item missing from list");
    assert_eq!(milk.get("title").and_then(Value::as_str), Some("milk"));
    assert_eq!(milk.get("done").and_then(Value::as_bool), Some(false));

    // Mark it done
    let resp = client
        .put(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .json(&json!({ "done": true }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse update response");
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));

    let resp = client
        .get(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get item");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse item response");
    assert_eq!(body.get("done").and_then(Value::as_bool), Some(true));

    // Delete it
    let resp = client
        .delete(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete item");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get deleted item");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting again reports not found rather than silently succeeding
    let resp = client
        .delete(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to re-delete item");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_update_list_title() {
    let client = Client::new();
    let base_url = base_url();
    let token = bearer_token(&client, "rename").await;

    let list_id = create_list(&client, &token, "Before").await;

    let resp = client
        .put(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&token)
        .json(&json!({ "title": "After" }))
        .send()
        .await
        .expect("Failed to update list");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get list");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse list response");
    assert_eq!(body.get("title").and_then(Value::as_str), Some("After"));
    // Untouched fields keep their values
    assert_eq!(body.get("description").and_then(Value::as_str), Some(""));
}

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_delete_list_removes_item_access() {
    let client = Client::new();
    let base_url = base_url();
    let token = bearer_token(&client, "cascade").await;

    let list_id = create_list(&client, &token, "Doomed").await;
    let item_id = create_item(&client, &token, list_id, "orphan-to-be").await;

    let resp = client
        .delete(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete list");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get deleted list");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The membership rows cascade away with the list, so the item is gone too
    let resp = client
        .get(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get item from deleted list");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Ownership Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_lists_are_invisible_across_accounts() {
    let client = Client::new();
    let base_url = base_url();
    let owner = bearer_token(&client, "owner").await;
    let intruder = bearer_token(&client, "intruder").await;

    let list_id = create_list(&client, &owner, "Private").await;
    let item_id = create_item(&client, &owner, list_id, "secret").await;

    // The other account's overview does not include the list
    let resp = client
        .get(format!("{base_url}/api/lists"))
        .bearer_auth(&intruder)
        .send()
        .await
        .expect("Failed to get lists");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse lists response");
    let lists = body
        .get("data")
        .and_then(Value::as_array)
        .expect("lists response missing data");
    assert!(
        !lists
            .iter()
            .any(|l| l.get("id").and_then(Value::as_i64) == Some(list_id)),
        "foreign list leaked into overview"
    );

    // Direct reads 404 exactly like a list that does not exist
    let resp = client
        .get(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&intruder)
        .send()
        .await
        .expect("Failed to get foreign list");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The item collection of a foreign list reads as empty
    let resp = client
        .get(format!("{base_url}/api/lists/{list_id}/items"))
        .bearer_auth(&intruder)
        .send()
        .await
        .expect("Failed to get foreign items");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse items response");
    let items = body
        .get("data")
        .and_then(Value::as_array)
        .expect("items response missing data");
    assert!(items.is_empty(), "foreign items leaked");

    let resp = client
        .get(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&intruder)
        .send()
        .await
        .expect("Failed to get foreign item");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_writes_to_foreign_rows_rejected() {
    let client = Client::new();
    let base_url = base_url();
    let owner = bearer_token(&client, "owner").await;
    let intruder = bearer_token(&client, "intruder").await;

    let list_id = create_list(&client, &owner, "Private").await;
    let item_id = create_item(&client, &owner, list_id, "keep me").await;

    let resp = client
        .put(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&intruder)
        .json(&json!({ "title": "mine now" }))
        .send()
        .await
        .expect("Failed to update foreign list");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .post(format!("{base_url}/api/lists/{list_id}/items"))
        .bearer_auth(&intruder)
        .json(&json!({ "title": "cuckoo egg" }))
        .send()
        .await
        .expect("Failed to create item in foreign list");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&intruder)
        .send()
        .await
        .expect("Failed to delete foreign item");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The owner still sees the untouched item
    let resp = client
        .get(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&owner)
        .send()
        .await
        .expect("Failed to get own item");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse item response");
    assert_eq!(body.get("title").and_then(Value::as_str), Some("keep me"));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_update_with_no_fields_rejected() {
    let client = Client::new();
    let base_url = base_url();
    let token = bearer_token(&client, "empty-update").await;

    let list_id = create_list(&client, &token, "Stable").await;
    let item_id = create_item(&client, &token, list_id, "stable item").await;

    let resp = client
        .put(format!("{base_url}/api/lists/{list_id}"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send empty list update");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .put(format!("{base_url}/api/items/{item_id}"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send empty item update");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running ticklist server and database"]
async fn test_create_item_in_missing_list_not_found() {
    let client = Client::new();
    let token = bearer_token(&client, "no-list").await;

    let resp = client
        .post(format!("{}/api/lists/{}/items", base_url(), i32::MAX))
        .bearer_auth(&token)
        .json(&json!({ "title": "nowhere to go" }))
        .send()
        .await
        .expect("Failed to create item in missing list");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Atomicity Tests
// ============================================================================

/// Connection string for direct database probes.
fn database_url() -> String {
    std::env::var("TICKLIST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TICKLIST_DATABASE_URL must be set for database probes")
}

#[tokio::test]
#[ignore = "Requires a migrated database reachable via TICKLIST_DATABASE_URL"]
async fn test_failed_item_create_leaves_no_orphan_row() {
    let pool = PgPool::connect(&database_url())
        .await
        .expect("Failed to connect to database");

    let marker = format!("orphan-probe-{}", Uuid::new_v4());
    let item = NewItem {
        title: marker.clone(),
        description: String::new(),
    };

    // No list with this id exists, so the membership insert must fail and
    // take the item insert down with it
    let missing_list = ListId::new(i32::MAX);
    let result = ItemRepository::new(&pool).create(missing_list, &item).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todo_items WHERE title = $1")
        .bind(&marker)
        .fetch_one(&pool)
        .await
        .expect("Failed to probe for orphan rows");
    assert_eq!(count, 0, "rolled-back create left an item row behind");
}
