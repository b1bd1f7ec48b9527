//! Repository for the `artworks` and `artwork_likes` tables.

use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::{Artwork, CreateArtwork};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, image_url, title, description, prompt, model, \
                       parameters, is_public, view_count, created_at, updated_at";

/// Provides CRUD, visibility, view, and like operations for artworks.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// Insert a new artwork row.
    pub async fn create(pool: &PgPool, input: &CreateArtwork) -> Result<Artwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO artworks (user_id, image_url, title, description, prompt, model, parameters, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(input.user_id)
            .bind(&input.image_url)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.prompt)
            .bind(&input.model)
            .bind(&input.parameters)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = $1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up the publish de-duplication key.
    ///
    /// Most recent row wins if duplicates exist (a concurrent-publish race
    /// can produce them; the key has no unique constraint).
    pub async fn find_by_user_and_image(
        pool: &PgPool,
        user_id: DbId,
        image_url: &str,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artworks
             WHERE user_id = $1 AND image_url = $2
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(user_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Flip the visibility flag. Returns `None` if the artwork does not exist.
    pub async fn set_visibility(
        pool: &PgPool,
        id: DbId,
        is_public: bool,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET is_public = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artwork. Likes, comments, tags, and collection items cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's own artworks, newest first, optionally filtered by
    /// visibility.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        visibility: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Artwork>, sqlx::Error> {
        match visibility {
            Some(is_public) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM artworks
                     WHERE user_id = $1 AND is_public = $2
                     ORDER BY created_at DESC
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, Artwork>(&query)
                    .bind(user_id)
                    .bind(is_public)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM artworks
                     WHERE user_id = $1
                     ORDER BY created_at DESC
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Artwork>(&query)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count a user's artworks under the same visibility filter as
    /// [`Self::list_for_user`].
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        visibility: Option<bool>,
    ) -> Result<i64, sqlx::Error> {
        match visibility {
            Some(is_public) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM artworks WHERE user_id = $1 AND is_public = $2",
                )
                .bind(user_id)
                .bind(is_public)
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM artworks WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_one(pool)
                .await
            }
        }
    }

    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE artworks SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Likes
    // -----------------------------------------------------------------------

    /// Like an artwork. Idempotent at the storage level: returns `false`
    /// when the user had already liked it.
    pub async fn like(pool: &PgPool, artwork_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO artwork_likes (artwork_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (artwork_id, user_id) DO NOTHING",
        )
        .bind(artwork_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns `false` when no like existed.
    pub async fn unlike(
        pool: &PgPool,
        artwork_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM artwork_likes WHERE artwork_id = $1 AND user_id = $2")
                .bind(artwork_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
