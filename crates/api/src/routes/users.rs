//! Route definitions for the `/users` profile endpoints.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /me           -> profile
/// PUT /me           -> update profile
/// PUT /me/password  -> change password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).put(users::update_me))
        .route("/me/password", put(users::change_password))
}
