//! Artwork entity model, feed row shape, and DTOs.

use lumen_core::feed::{FeedSort, FeedTimeRange};
use lumen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full artwork row from the `artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: DbId,
    pub user_id: DbId,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub model: String,
    /// Always a JSON-serialized string, normalized at the API boundary.
    pub parameters: String,
    pub is_public: bool,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an artwork row.
#[derive(Debug)]
pub struct CreateArtwork {
    pub user_id: DbId,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub model: String,
    pub parameters: String,
    pub is_public: bool,
}

/// Filter parameters for the community feed query.
///
/// Wire-level parsing (camelCase names, defaults, "all" sentinel) happens in
/// the handler; by the time this struct reaches the repository every field
/// is already validated.
#[derive(Debug, Default)]
pub struct FeedQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Tag name; `None` disables the category filter.
    pub category: Option<String>,
    pub sort_by: FeedSort,
    pub search: Option<String>,
    pub model_type: Option<String>,
    pub time_range: FeedTimeRange,
}

/// One feed row: artwork columns joined with author display data and
/// derived counts. Tags are attached after the batch fetch.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub model: String,
    pub parameters: String,
    pub is_public: bool,
    pub view_count: i32,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(skip)]
    pub tags: Vec<String>,
}

/// A full feed page with pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}
