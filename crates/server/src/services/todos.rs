//! Todo list and item service.
//!
//! Thin orchestration over the list and item repositories. Every method
//! takes the calling user's ID and only ever touches rows that user owns;
//! ownership failures surface as `RepositoryError::NotFound` just like
//! missing rows.

use sqlx::PgPool;

use ticklist_core::{ItemId, ListId, UserId};

use crate::db::RepositoryError;
use crate::db::items::ItemRepository;
use crate::db::lists::ListRepository;
use crate::models::{NewItem, NewList, TodoItem, TodoList, UpdateItem, UpdateList};

/// Todo list and item service.
pub struct TodoService<'a> {
    lists: ListRepository<'a>,
    items: ItemRepository<'a>,
}

impl<'a> TodoService<'a> {
    /// Create a new todo service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            lists: ListRepository::new(pool),
            items: ItemRepository::new(pool),
        }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Create a list owned by the user and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_list(
        &self,
        user_id: UserId,
        list: &NewList,
    ) -> Result<ListId, RepositoryError> {
        self.lists.create(user_id, list).await
    }

    /// Get all lists owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_lists(&self, user_id: UserId) -> Result<Vec<TodoList>, RepositoryError> {
        self.lists.get_all(user_id).await
    }

    /// Get a single list owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list does not exist or
    /// belongs to someone else.
    pub async fn get_list(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<TodoList, RepositoryError> {
        self.lists.get_by_id(user_id, list_id).await
    }

    /// Apply a partial update to a list owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list does not exist or
    /// belongs to someone else.
    pub async fn update_list(
        &self,
        user_id: UserId,
        list_id: ListId,
        patch: &UpdateList,
    ) -> Result<(), RepositoryError> {
        self.lists.update(user_id, list_id, patch).await
    }

    /// Delete a list owned by the user.
    ///
    /// Returns `true` if a list was deleted, `false` if there was nothing
    /// to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_list(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<bool, RepositoryError> {
        self.lists.delete(user_id, list_id).await
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Create an item in a list owned by the user and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list does not exist or
    /// belongs to someone else.
    pub async fn create_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item: &NewItem,
    ) -> Result<ItemId, RepositoryError> {
        // The list must belong to the caller before anything is inserted
        self.lists.get_by_id(user_id, list_id).await?;

        self.items.create(list_id, item).await
    }

    /// Get all items in a list owned by the user.
    ///
    /// An unowned or missing list yields an empty collection, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_items(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<Vec<TodoItem>, RepositoryError> {
        self.items.get_all(user_id, list_id).await
    }

    /// Get a single item from a list owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// lives in a list the user does not own.
    pub async fn get_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<TodoItem, RepositoryError> {
        self.items.get_by_id(user_id, item_id).await
    }

    /// Apply a partial update to an item in a list owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// lives in a list the user does not own.
    pub async fn update_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
        patch: &UpdateItem,
    ) -> Result<(), RepositoryError> {
        self.items.update(user_id, item_id, patch).await
    }

    /// Delete an item from a list owned by the user.
    ///
    /// Returns `true` if an item was deleted, `false` if there was nothing
    /// to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<bool, RepositoryError> {
        self.items.delete(user_id, item_id).await
    }
}
