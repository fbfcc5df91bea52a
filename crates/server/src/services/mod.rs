//! Business logic services for the Ticklist server.
//!
//! # Services
//!
//! - `auth` - Registration, credential checks, and bearer token handling
//! - `todos` - List and item operations behind ownership checks

pub mod auth;
pub mod todos;
