//! Route definitions for the `/generate` proxy.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// GET  /result     -> poll generation result
/// POST /{endpoint} -> forward generation request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/result", get(generation::get_result))
        .route("/{endpoint}", post(generation::generate))
}
