//! Handler for the `/statistics` aggregation endpoint.
//!
//! The repository fetches minimal rows; all math lives in
//! `lumen_core::stats` where it is unit-tested without a database.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::error::CoreError;
use lumen_core::stats::{self, StatsTimeRange};
use lumen_core::types::DbId;
use lumen_db::repositories::StatsRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /statistics`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    pub user_id: Option<DbId>,
    pub time_range: Option<StatsTimeRange>,
}

/// GET /api/v1/statistics?userId=&timeRange=
///
/// Generation statistics for one user. Callers may only query themselves;
/// foreign ids are rejected whether or not the target exists.
pub async fn statistics(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StatsParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::BadRequest("userId is required".into()))?;

    if user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot view another user's statistics".into(),
        )));
    }

    let range = params.time_range.unwrap_or_default();
    let cutoff = range.cutoff(stats::now());

    let samples = StatsRepo::samples_since(&state.pool, user_id, cutoff).await?;
    let aggregated = stats::aggregate(&samples);

    Ok(Json(DataResponse { data: aggregated }))
}
