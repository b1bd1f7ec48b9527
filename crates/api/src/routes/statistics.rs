//! Route definitions for the `/statistics` endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Routes mounted at `/statistics`.
///
/// ```text
/// GET / -> generation statistics for the caller
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(statistics::statistics))
}
