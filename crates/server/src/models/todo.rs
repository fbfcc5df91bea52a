//! Todo list and item domain types.

use serde::{Deserialize, Serialize};

use ticklist_core::{ItemId, ListId};

/// A todo list owned by a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TodoList {
    /// Unique list ID.
    pub id: ListId,
    /// List title.
    pub title: String,
    /// Free-form description.
    pub description: String,
}

/// A todo item attached to a list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TodoItem {
    /// Unique item ID.
    pub id: ItemId,
    /// Item title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Whether the item is completed.
    pub done: bool,
}

/// Payload for creating a list.
#[derive(Debug, Deserialize)]
pub struct NewList {
    /// List title.
    pub title: String,
    /// Free-form description, empty if omitted.
    #[serde(default)]
    pub description: String,
}

/// Payload for creating an item.
#[derive(Debug, Deserialize)]
pub struct NewItem {
    /// Item title.
    pub title: String,
    /// Free-form description, empty if omitted.
    #[serde(default)]
    pub description: String,
}

/// Partial update for a list. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateList {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
}

impl UpdateList {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Partial update for an item. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItem {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New completion state, if changing.
    pub done: Option<bool>,
}

impl UpdateItem {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_description_defaults_to_empty() {
        let list: NewList = serde_json::from_str(r#"{"title": "groceries"}"#).unwrap();
        assert_eq!(list.title, "groceries");
        assert_eq!(list.description, "");
    }

    #[test]
    fn test_update_item_is_empty() {
        let empty: UpdateItem = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let done_only: UpdateItem = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(!done_only.is_empty());
    }

    #[test]
    fn test_update_list_is_empty() {
        let empty = UpdateList::default();
        assert!(empty.is_empty());

        let titled: UpdateList = serde_json::from_str(r#"{"title": "renamed"}"#).unwrap();
        assert!(!titled.is_empty());
    }

    #[test]
    fn test_todo_item_serializes_flat() {
        let item = TodoItem {
            id: ItemId::new(3),
            title: "buy milk".to_owned(),
            description: String::new(),
            done: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["title"], "buy milk");
        assert_eq!(json["done"], false);
    }
}
