//! Handlers for the `/generate` proxy.
//!
//! Requests are forwarded to the external generation service with the
//! service credential injected; upstream status and body are relayed
//! verbatim, including provider errors. Each successful generation request
//! costs one credit.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::credits::GENERATION_COST;
use lumen_core::error::CoreError;
use lumen_db::repositories::UserRepo;
use lumen_diffusion::{is_valid_endpoint, UpstreamResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /generate/result`.
#[derive(Debug, Deserialize)]
pub struct ResultParams {
    pub id: String,
}

/// POST /api/v1/generate/{endpoint}
///
/// Forward a generation request. The endpoint must be one of the logical
/// names the proxy accepts; the payload is passed through byte-for-byte.
/// Credits are deducted only after a successful upstream response.
pub async fn generate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(endpoint): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    if !is_valid_endpoint(&endpoint) {
        return Err(AppError::BadRequest(format!(
            "Unknown generation endpoint: {endpoint}"
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, auth_user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("user not found".into())))?;
    if user.credits < GENERATION_COST {
        return Err(AppError::Core(CoreError::Forbidden(
            "Insufficient credits".into(),
        )));
    }

    let upstream = state.diffusion.generate(&endpoint, &payload).await?;

    if (200..300).contains(&upstream.status) {
        let remaining = UserRepo::spend_credits(&state.pool, auth_user.id, GENERATION_COST).await?;
        if remaining.is_none() {
            // Balance drained by a concurrent request between the check and
            // the deduction; the generation already happened, so log only.
            tracing::warn!(user_id = auth_user.id, "Credit deduction skipped: balance exhausted");
        }
    }

    Ok(relay(upstream))
}

/// GET /api/v1/generate/result?id=
///
/// Poll the generation service for a result; status and body are relayed
/// verbatim.
pub async fn get_result(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<ResultParams>,
) -> AppResult<impl IntoResponse> {
    if params.id.trim().is_empty() {
        return Err(AppError::BadRequest("id is required".into()));
    }

    let upstream = state.diffusion.fetch_result(&params.id).await?;
    Ok(relay(upstream))
}

/// Convert an upstream response into an axum response with the original
/// status code.
fn relay(upstream: UpstreamResponse) -> impl IntoResponse {
    let status =
        StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(upstream.body))
}
