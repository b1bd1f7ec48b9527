//! Community feed query assembly.
//!
//! Builds one parameterized page query plus a matching count query from a
//! single [`SqlFilter`], so both always see the identical predicate set.

use std::collections::HashMap;

use chrono::Utc;
use lumen_core::feed::{
    clamp_limit, clamp_offset, has_more, FeedSort, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT,
    TRENDING_WINDOW_DAYS,
};
use lumen_core::types::DbId;
use sqlx::PgPool;

use crate::filter::{BindValue, SqlFilter};
use crate::models::artwork::{FeedItem, FeedPage, FeedQuery};
use crate::repositories::TagRepo;

/// Feed row columns: artwork fields, author display data, derived counts.
const FEED_COLUMNS: &str = "\
    a.id, a.user_id, u.username, u.display_name, a.image_url, a.title, \
    a.description, a.prompt, a.model, a.parameters, a.is_public, a.view_count, \
    (SELECT COUNT(*)::BIGINT FROM artwork_likes l WHERE l.artwork_id = a.id) AS like_count, \
    (SELECT COUNT(*)::BIGINT FROM artwork_comments c WHERE c.artwork_id = a.id) AS comment_count, \
    a.created_at, a.updated_at";

/// Provides the paginated community feed and public artwork detail.
pub struct FeedRepo;

impl FeedRepo {
    /// Execute the feed query: one page of public artworks plus the total
    /// count over the identical predicate set, with tags batch-attached.
    pub async fn query(pool: &PgPool, params: &FeedQuery) -> Result<FeedPage, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT);
        let offset = clamp_offset(params.offset);

        let filter = build_feed_filter(params);
        let where_clause = filter.where_clause();
        let order_clause = order_clause(params.sort_by);

        let page_query = format!(
            "SELECT {FEED_COLUMNS} FROM artworks a JOIN users u ON u.id = a.user_id \
             {where_clause} \
             ORDER BY {order_clause} \
             LIMIT ${} OFFSET ${}",
            filter.next_index(),
            filter.next_index() + 1
        );
        let q = filter.bind_to(sqlx::query_as::<_, FeedItem>(&page_query));
        let mut items = q.bind(limit).bind(offset).fetch_all(pool).await?;

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM artworks a {where_clause}");
        let q = filter.bind_to_scalar(sqlx::query_scalar::<_, i64>(&count_query));
        let total = q.fetch_one(pool).await?;

        attach_tags(pool, &mut items).await?;

        Ok(FeedPage {
            items,
            total,
            limit,
            offset,
            has_more: has_more(offset, limit, total),
        })
    }

    /// Public artwork detail in the feed row shape, tags included.
    pub async fn find_item(pool: &PgPool, id: DbId) -> Result<Option<FeedItem>, sqlx::Error> {
        let query = format!(
            "SELECT {FEED_COLUMNS} FROM artworks a JOIN users u ON u.id = a.user_id \
             WHERE a.id = $1"
        );
        let item = sqlx::query_as::<_, FeedItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match item {
            Some(mut item) => {
                item.tags = TagRepo::names_for_artwork(pool, item.id).await?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }
}

/// Assemble the predicate set. The base predicate keeps private rows out of
/// every feed result regardless of the other filters.
fn build_feed_filter(params: &FeedQuery) -> SqlFilter {
    let mut filter = SqlFilter::new();
    filter.push_static("a.is_public = true");

    if let Some(ref search) = params.search {
        if !search.trim().is_empty() {
            filter.push(
                "(a.title ILIKE $? OR a.description ILIKE $?)",
                BindValue::Text(format!("%{}%", search.trim())),
            );
        }
    }

    if let Some(ref category) = params.category {
        filter.push(
            "EXISTS (SELECT 1 FROM artwork_tags at JOIN tags t ON t.id = at.tag_id \
             WHERE at.artwork_id = a.id AND t.name = $?)",
            BindValue::Text(category.trim().to_lowercase()),
        );
    }

    if let Some(ref model) = params.model_type {
        filter.push("a.model = $?", BindValue::Text(model.clone()));
    }

    if let Some(cutoff) = params.time_range.cutoff(Utc::now()) {
        filter.push("a.created_at >= $?", BindValue::Timestamp(cutoff));
    }

    filter
}

/// Explicit tie-breaks keep the ordering deterministic for every sort mode.
fn order_clause(sort: FeedSort) -> String {
    match sort {
        FeedSort::Newest => "a.created_at DESC".to_string(),
        FeedSort::Trending => format!(
            "(SELECT COUNT(*) FROM artwork_likes l WHERE l.artwork_id = a.id \
             AND l.created_at >= NOW() - INTERVAL '{TRENDING_WINDOW_DAYS} days') DESC, \
             a.created_at DESC"
        ),
        FeedSort::Popular => {
            "like_count DESC, a.view_count DESC, a.created_at DESC".to_string()
        }
    }
}

/// Batch-fetch tags for the whole page in one `= ANY($1)` query and attach
/// each row's list, defaulting to empty.
async fn attach_tags(pool: &PgPool, items: &mut [FeedItem]) -> Result<(), sqlx::Error> {
    let ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
    let rows = TagRepo::for_artworks(pool, &ids).await?;

    let mut by_artwork: HashMap<DbId, Vec<String>> = HashMap::new();
    for row in rows {
        by_artwork.entry(row.artwork_id).or_default().push(row.name);
    }
    for item in items {
        item.tags = by_artwork.remove(&item.id).unwrap_or_default();
    }
    Ok(())
}
