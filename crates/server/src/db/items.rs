//! Todo item repository for database operations.
//!
//! Items hang off lists through the `lists_items` join, and lists hang off
//! users through `users_lists`. Reads walk both joins so an item is visible
//! only to the user who owns its list.

use sqlx::PgPool;

use ticklist_core::{ItemId, ListId, UserId};

use super::RepositoryError;
use crate::models::todo::{NewItem, TodoItem, UpdateItem};

/// Repository for todo item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an item and its membership row in one transaction.
    ///
    /// Both inserts commit together; an error on either leaves no orphaned
    /// item behind, as the transaction rolls back when dropped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the target list vanished
    /// before the membership row could reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, list_id: ListId, item: &NewItem) -> Result<ItemId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let item_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO todo_items (title, description)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(&item.title)
        .bind(&item.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO lists_items (list_id, item_id)
            VALUES ($1, $2)
            ",
        )
        .bind(list_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        Ok(ItemId::new(item_id))
    }

    /// Get all items in a list, scoped to the list's owner.
    ///
    /// Returns an empty vector when the list does not exist or belongs to
    /// someone else; an unowned list looks exactly like an empty one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<Vec<TodoItem>, RepositoryError> {
        let items = sqlx::query_as(
            r"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            INNER JOIN lists_items li ON ti.id = li.item_id
            INNER JOIN users_lists ul ON li.list_id = ul.list_id
            WHERE li.list_id = $1 AND ul.user_id = $2
            ORDER BY ti.id
            ",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get a single item, scoped to its list's owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or
    /// belongs to someone else; the two cases are indistinguishable.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<TodoItem, RepositoryError> {
        let item: Option<TodoItem> = sqlx::query_as(
            r"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            INNER JOIN lists_items li ON ti.id = li.item_id
            INNER JOIN users_lists ul ON li.list_id = ul.list_id
            WHERE ti.id = $1 AND ul.user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        item.ok_or(RepositoryError::NotFound)
    }

    /// Update an item's title, description, and/or done flag.
    ///
    /// Absent fields keep their current value via `COALESCE`, so the whole
    /// update is a single ownership-scoped statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned row was updated.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        patch: &UpdateItem,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE todo_items ti
            SET title = COALESCE($1, ti.title),
                description = COALESCE($2, ti.description),
                done = COALESCE($3, ti.done)
            FROM lists_items li, users_lists ul
            WHERE ti.id = li.item_id
              AND li.list_id = ul.list_id
              AND ul.user_id = $4
              AND ti.id = $5
            ",
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.done)
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an item, scoped to its list's owner.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if no owned row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, item_id: ItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM todo_items ti
            USING lists_items li, users_lists ul
            WHERE ti.id = li.item_id
              AND li.list_id = ul.list_id
              AND ul.user_id = $1
              AND ti.id = $2
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
