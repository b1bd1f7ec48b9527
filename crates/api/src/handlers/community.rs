//! Handlers for the `/community` feed.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::error::CoreError;
use lumen_core::feed::{FeedSort, FeedTimeRange};
use lumen_core::types::DbId;
use lumen_db::models::artwork::FeedQuery;
use lumen_db::repositories::{ArtworkRepo, FeedRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Wire-level feed parameters. Unknown `sortBy`/`timeRange` values are
/// rejected with 400 by the query deserializer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub category: Option<String>,
    pub sort_by: Option<FeedSort>,
    pub search: Option<String>,
    pub model_type: Option<String>,
    pub time_range: Option<FeedTimeRange>,
}

/// GET /api/v1/community
///
/// Paginated public feed with filter and sort parameters. Private rows
/// never appear regardless of the filter combination.
pub async fn feed(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    // "all" is the wire sentinel for no category filter.
    let category = params
        .category
        .filter(|c| !c.trim().is_empty() && c.trim() != "all");

    let query = FeedQuery {
        limit: params.limit,
        offset: params.offset,
        category,
        sort_by: params.sort_by.unwrap_or_default(),
        search: params.search,
        model_type: params.model_type.filter(|m| !m.trim().is_empty()),
        time_range: params.time_range.unwrap_or_default(),
    };

    let page = FeedRepo::query(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/community/{id}
///
/// Artwork detail in the feed row shape. Private artworks are visible to
/// their owner only; each successful fetch counts a view.
pub async fn detail(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut item = FeedRepo::find_item(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    if !item.is_public && item.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Artwork is private".into(),
        )));
    }

    ArtworkRepo::increment_view_count(&state.pool, id).await?;
    item.view_count += 1;

    Ok(Json(DataResponse { data: item }))
}
