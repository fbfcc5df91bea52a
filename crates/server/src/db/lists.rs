//! Todo list repository for database operations.
//!
//! A list is only reachable through the `users_lists` ownership join, so
//! every query here is scoped by the calling user's ID.

use sqlx::PgPool;

use ticklist_core::{ListId, UserId};

use super::RepositoryError;
use crate::models::todo::{NewList, TodoList, UpdateList};

/// Repository for todo list database operations.
pub struct ListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ListRepository<'a> {
    /// Create a new list repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a list and its ownership row in one transaction.
    ///
    /// Both inserts commit together; an error on either leaves no trace of
    /// the list, as the transaction rolls back when dropped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails.
    pub async fn create(&self, user_id: UserId, list: &NewList) -> Result<ListId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let list_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO todo_lists (title, description)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(&list.title)
        .bind(&list.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO users_lists (user_id, list_id)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ListId::new(list_id))
    }

    /// Get all lists owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>, RepositoryError> {
        let lists = sqlx::query_as(
            r"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            INNER JOIN users_lists ul ON tl.id = ul.list_id
            WHERE ul.user_id = $1
            ORDER BY tl.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }

    /// Get a single list owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list does not exist or
    /// belongs to someone else; the two cases are indistinguishable.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<TodoList, RepositoryError> {
        let list: Option<TodoList> = sqlx::query_as(
            r"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            INNER JOIN users_lists ul ON tl.id = ul.list_id
            WHERE ul.user_id = $1 AND ul.list_id = $2
            ",
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_optional(self.pool)
        .await?;

        list.ok_or(RepositoryError::NotFound)
    }

    /// Update a list's title and/or description.
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
        list_id: ListId,
        patch: &UpdateList,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE todo_lists tl
            SET title = COALESCE($1, tl.title),
                description = COALESCE($2, tl.description)
            FROM users_lists ul
            WHERE tl.id = ul.list_id AND ul.user_id = $3 AND ul.list_id = $4
            ",
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(user_id)
        .bind(list_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a list owned by a user.
    ///
    /// Join rows in `users_lists` and `lists_items` go with it via cascade.
    ///
    /// # Returns
    ///
    /// Returns `true` if the list was deleted, `false` if no owned row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, list_id: ListId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM todo_lists tl
            USING users_lists ul
            WHERE tl.id = ul.list_id AND ul.user_id = $1 AND ul.list_id = $2
            ",
        )
        .bind(user_id)
        .bind(list_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
