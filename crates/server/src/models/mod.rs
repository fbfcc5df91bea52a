//! Domain types for the Ticklist server.
//!
//! These types represent validated domain objects separate from database
//! row types and request payloads.

pub mod todo;
pub mod user;

pub use todo::{NewItem, NewList, TodoItem, TodoList, UpdateItem, UpdateList};
pub use user::{NewUser, User};
