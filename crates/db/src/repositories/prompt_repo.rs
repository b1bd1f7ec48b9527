//! Repository for the `prompts` table.
//!
//! Categories and the tag cloud are aggregates grouped on the fly from the
//! raw `category` and `tags` columns; there is no authoritative category
//! table.

use lumen_core::feed::{clamp_limit, clamp_offset, has_more};
use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::filter::{BindValue, SqlFilter};
use crate::models::prompt::{
    CategoryCount, CreatePrompt, Prompt, PromptListQuery, PromptPage, TagCount, UpdatePrompt,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, content, category, tags, is_favorite, \
                       use_count, is_public, created_at, updated_at";

/// Default page size for the prompt listing.
const DEFAULT_LIMIT: i64 = 20;

/// Maximum page size for the prompt listing.
const MAX_LIMIT: i64 = 100;

/// Bucket name for prompts with no category.
const UNCATEGORIZED: &str = "uncategorized";

/// Provides CRUD and aggregate operations for the prompt library.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a new prompt, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts (user_id, title, content, category, tags, is_public)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The owner's prompts, newest first, with optional category, favorite,
    /// and substring-search filters.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &PromptListQuery,
    ) -> Result<PromptPage, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);

        let mut filter = SqlFilter::new();
        filter.push("user_id = $?", BindValue::BigInt(user_id));
        if let Some(ref category) = params.category {
            filter.push("category = $?", BindValue::Text(category.clone()));
        }
        if let Some(favorite) = params.favorite {
            filter.push("is_favorite = $?", BindValue::Bool(favorite));
        }
        if let Some(ref search) = params.search {
            if !search.trim().is_empty() {
                filter.push(
                    "(title ILIKE $? OR content ILIKE $?)",
                    BindValue::Text(format!("%{}%", search.trim())),
                );
            }
        }
        let where_clause = filter.where_clause();

        let page_query = format!(
            "SELECT {COLUMNS} FROM prompts {where_clause}
             ORDER BY created_at DESC
             LIMIT ${} OFFSET ${}",
            filter.next_index(),
            filter.next_index() + 1
        );
        let q = filter.bind_to(sqlx::query_as::<_, Prompt>(&page_query));
        let items = q.bind(limit).bind(offset).fetch_all(pool).await?;

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM prompts {where_clause}");
        let q = filter.bind_to_scalar(sqlx::query_scalar::<_, i64>(&count_query));
        let total = q.fetch_one(pool).await?;

        Ok(PromptPage {
            items,
            total,
            limit,
            offset,
            has_more: has_more(offset, limit, total),
        })
    }

    /// Partial update. `None` fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePrompt,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE prompts SET
                 title = COALESCE($2, title),
                 content = COALESCE($3, content),
                 category = COALESCE($4, category),
                 tags = COALESCE($5, tags),
                 is_public = COALESCE($6, is_public),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the favorite flag, returning the updated row.
    pub async fn toggle_favorite(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE prompts SET is_favorite = NOT is_favorite, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Increment the usage counter, returning the updated row.
    pub async fn increment_use_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE prompts SET use_count = use_count + 1, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `{category, count}` aggregates over the caller's prompts, count
    /// descending then name. NULL categories bucket as "uncategorized".
    pub async fn categories(pool: &PgPool, user_id: DbId) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT COALESCE(category, $2) AS category, COUNT(*)::BIGINT AS count
             FROM prompts
             WHERE user_id = $1
             GROUP BY COALESCE(category, $2)
             ORDER BY count DESC, category",
        )
        .bind(user_id)
        .bind(UNCATEGORIZED)
        .fetch_all(pool)
        .await
    }

    /// Tag cloud via `unnest(tags)`, count descending then name.
    pub async fn tag_cloud(pool: &PgPool, user_id: DbId) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            "SELECT tag, COUNT(*)::BIGINT AS count
             FROM prompts, unnest(tags) AS tag
             WHERE user_id = $1
             GROUP BY tag
             ORDER BY count DESC, tag",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
