//! Core types for Ticklist.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod username;

pub use id::*;
pub use username::{Username, UsernameError};
