//! Prompt library entity model and DTOs.

use lumen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full prompt row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub use_count: i32,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a prompt row. Tags arrive already normalized.
#[derive(Debug)]
pub struct CreatePrompt {
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// DTO for updating a prompt. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdatePrompt {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Filter parameters for the owner's prompt listing.
#[derive(Debug, Default)]
pub struct PromptListQuery {
    pub category: Option<String>,
    pub favorite: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A full prompt page with pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPage {
    pub items: Vec<Prompt>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// One `{category, count}` aggregate grouped on the fly from prompt rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// One `{tag, count}` aggregate from the unnested tag arrays.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}
