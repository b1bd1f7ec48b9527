//! Repository for the `artwork_comments` table.

use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{CommentWithAuthor, CreateComment};

/// Joined comment columns shared by list and create queries.
const JOINED_COLUMNS: &str = "\
    c.id, c.artwork_id, c.user_id, u.username, u.display_name, \
    c.content, c.rating, c.created_at";

/// Provides comment listing, creation, and deletion.
pub struct CommentRepo;

impl CommentRepo {
    /// Comments for an artwork with author display data, newest first.
    pub async fn list_for_artwork(
        pool: &PgPool,
        artwork_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM artwork_comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.artwork_id = $1
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(artwork_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a comment and return it with the author joined in.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComment,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO artwork_comments (artwork_id, user_id, content, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.artwork_id)
        .bind(input.user_id)
        .bind(&input.content)
        .bind(input.rating)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM artwork_comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// The comment author's user id, for the ownership check before delete.
    pub async fn find_author(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM artwork_comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artwork_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
