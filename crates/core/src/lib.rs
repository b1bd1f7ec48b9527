//! Pure domain types and helpers for the Lumen platform.
//!
//! This crate has no internal dependencies and no I/O, so the same logic can
//! be used by the API layer, the repository layer, and tooling.

pub mod artwork;
pub mod credits;
pub mod error;
pub mod feed;
pub mod stats;
pub mod types;
