//! Comment entity model and DTOs.

use lumen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Comment row joined with the author's display data.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub artwork_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub content: String,
    pub rating: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for creating a comment.
#[derive(Debug)]
pub struct CreateComment {
    pub artwork_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub rating: Option<i32>,
}
