//! Repository for the `tags` and `artwork_tags` tables.

use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{ArtworkTagRow, Tag};

/// Provides tag creation and artwork-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag or return the existing one if the normalized name
    /// already exists. Idempotent via `ON CONFLICT`.
    pub async fn create_or_get(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        let normalized = normalize_tag_name(name);
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name, created_at",
        )
        .bind(&normalized)
        .fetch_one(pool)
        .await
    }

    /// Apply a tag to an artwork. Idempotent: does nothing if already applied.
    pub async fn apply(pool: &PgPool, artwork_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO artwork_tags (artwork_id, tag_id)
             VALUES ($1, $2)
             ON CONFLICT (artwork_id, tag_id) DO NOTHING",
        )
        .bind(artwork_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach a set of tag names to an artwork, creating tags on first use.
    pub async fn attach_names(
        pool: &PgPool,
        artwork_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        for name in names {
            if name.trim().is_empty() {
                continue;
            }
            let tag = Self::create_or_get(pool, name).await?;
            Self::apply(pool, artwork_id, tag.id).await?;
        }
        Ok(())
    }

    /// Tag names for one artwork, alphabetical.
    pub async fn names_for_artwork(
        pool: &PgPool,
        artwork_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT t.name FROM artwork_tags at
             JOIN tags t ON t.id = at.tag_id
             WHERE at.artwork_id = $1
             ORDER BY t.name",
        )
        .bind(artwork_id)
        .fetch_all(pool)
        .await
    }

    /// Batch-fetch tag names for a whole feed page in one query.
    pub async fn for_artworks(
        pool: &PgPool,
        artwork_ids: &[DbId],
    ) -> Result<Vec<ArtworkTagRow>, sqlx::Error> {
        if artwork_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, ArtworkTagRow>(
            "SELECT at.artwork_id, t.name FROM artwork_tags at
             JOIN tags t ON t.id = at.tag_id
             WHERE at.artwork_id = ANY($1)
             ORDER BY at.artwork_id, t.name",
        )
        .bind(artwork_ids)
        .fetch_all(pool)
        .await
    }
}

/// Normalize a tag name: trim whitespace and lowercase.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}
