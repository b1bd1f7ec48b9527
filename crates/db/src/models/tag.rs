//! Tag entity model.

use lumen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full tag row from the `tags` table. Names are normalized lowercase.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// One `(artwork_id, tag_name)` pair from the batch tag fetch.
#[derive(Debug, Clone, FromRow)]
pub struct ArtworkTagRow {
    pub artwork_id: DbId,
    pub name: String,
}
