//! Route definitions for the `/community` feed.

use axum::routing::get;
use axum::Router;

use crate::handlers::community;
use crate::state::AppState;

/// Routes mounted at `/community`.
///
/// ```text
/// GET /      -> paginated public feed
/// GET /{id}  -> artwork detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(community::feed))
        .route("/{id}", get(community::detail))
}
