//! Request handlers, one module per resource.

pub mod artworks;
pub mod auth;
pub mod collections;
pub mod community;
pub mod generation;
pub mod prompts;
pub mod statistics;
pub mod users;
