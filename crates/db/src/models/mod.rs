//! Row structs and DTOs, one module per entity.

pub mod artwork;
pub mod collection;
pub mod comment;
pub mod prompt;
pub mod session;
pub mod tag;
pub mod user;
