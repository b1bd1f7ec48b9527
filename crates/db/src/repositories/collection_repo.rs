//! Repository for the `collections` and `collection_items` tables.

use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{
    Collection, CollectionItemDetail, CollectionWithCount, CreateCollection, UpdateCollection,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, is_public, created_at, updated_at";

/// Provides CRUD operations for collections and their items.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a new collection, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (user_id, name, description, is_public)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE id = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The owner's collections with item counts, most recently updated first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CollectionWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CollectionWithCount>(
            "SELECT c.id, c.user_id, c.name, c.description, c.is_public,
                    (SELECT COUNT(*)::BIGINT FROM collection_items ci
                     WHERE ci.collection_id = c.id) AS item_count,
                    c.created_at, c.updated_at
             FROM collections c
             WHERE c.user_id = $1
             ORDER BY c.updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Partial update. `None` fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET
                 name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 is_public = COALESCE($4, is_public),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a collection. Items cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Items joined with artwork and artwork-owner display data, newest
    /// addition first.
    pub async fn items(
        pool: &PgPool,
        collection_id: DbId,
    ) -> Result<Vec<CollectionItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, CollectionItemDetail>(
            "SELECT ci.artwork_id, ci.added_at, a.image_url, a.title, a.description,
                    a.model, a.is_public,
                    u.id AS owner_id, u.username AS owner_username,
                    u.display_name AS owner_display_name
             FROM collection_items ci
             JOIN artworks a ON a.id = ci.artwork_id
             JOIN users u ON u.id = a.user_id
             WHERE ci.collection_id = $1
             ORDER BY ci.added_at DESC",
        )
        .bind(collection_id)
        .fetch_all(pool)
        .await
    }

    /// Add an artwork to a collection. Returns `false` when the pair already
    /// exists. Touches the collection's `updated_at` on success.
    pub async fn add_item(
        pool: &PgPool,
        collection_id: DbId,
        artwork_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO collection_items (collection_id, artwork_id)
             VALUES ($1, $2)
             ON CONFLICT (collection_id, artwork_id) DO NOTHING",
        )
        .bind(collection_id)
        .bind(artwork_id)
        .execute(pool)
        .await?;

        let was_added = result.rows_affected() > 0;
        if was_added {
            Self::touch(pool, collection_id).await?;
        }
        Ok(was_added)
    }

    /// Delete the join row by `(collection_id, artwork_id)`. Returns `false`
    /// when no such row exists. Touches the collection's `updated_at` on
    /// success.
    pub async fn remove_item(
        pool: &PgPool,
        collection_id: DbId,
        artwork_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM collection_items WHERE collection_id = $1 AND artwork_id = $2",
        )
        .bind(collection_id)
        .bind(artwork_id)
        .execute(pool)
        .await?;

        let was_removed = result.rows_affected() > 0;
        if was_removed {
            Self::touch(pool, collection_id).await?;
        }
        Ok(was_removed)
    }

    async fn touch(pool: &PgPool, collection_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE collections SET updated_at = NOW() WHERE id = $1")
            .bind(collection_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
