//! Authentication building blocks: JWT access tokens, opaque session
//! tokens, and Argon2id password hashing.

pub mod jwt;
pub mod password;
