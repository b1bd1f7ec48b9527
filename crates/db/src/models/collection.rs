//! Collection entity models and DTOs.

use lumen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full collection row from the `collections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Collection row with its item count, for the owner's listing.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionWithCount {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub item_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One collection item joined with its artwork and the artwork owner's
/// display data, ordered by addition time descending.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItemDetail {
    pub artwork_id: DbId,
    pub added_at: Timestamp,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub model: String,
    pub is_public: bool,
    pub owner_id: DbId,
    pub owner_username: String,
    pub owner_display_name: Option<String>,
}

/// DTO for creating a collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollection {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// DTO for updating a collection. All fields are optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollection {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}
