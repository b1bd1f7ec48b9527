//! Authentication extractor for protected routes.
//!
//! Handlers opt into authentication by taking an [`AuthUser`] parameter.
//! Credentials are resolved in order:
//!
//! 1. `lumen_session` cookie -- opaque session token, looked up by SHA-256
//!    hash in the `user_sessions` table.
//! 2. `Authorization: Bearer <jwt>` header.
//! 3. `lumen_token` cookie carrying the same JWT (for browser clients that
//!    cannot set headers).
//!
//! Any failure short-circuits the handler with a 401 JSON error.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use lumen_core::error::CoreError;
use lumen_core::types::DbId;
use lumen_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{hash_session_token, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "lumen_session";
/// Name of the cookie carrying the JWT access token.
pub const TOKEN_COOKIE: &str = "lumen_token";

/// The authenticated user, resolved from the request's credentials.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Session cookie takes precedence over bearer tokens.
        if let Some(session_token) = cookie_value(parts, SESSION_COOKIE) {
            let hash = hash_session_token(&session_token);
            if let Some(session) = SessionRepo::find_active_by_token_hash(&state.pool, &hash)
                .await
                .map_err(AppError::Database)?
            {
                return load_user(state, session.user_id).await;
            }
            // Stale or revoked session: fall through to the token path so a
            // still-valid JWT keeps working.
        }

        let token = bearer_token(parts)
            .or_else(|| cookie_value(parts, TOKEN_COOKIE))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("authentication required".into()))
            })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("invalid or expired token".into()))
        })?;

        load_user(state, claims.sub).await
    }
}

/// Fetch the user row backing a validated credential.
async fn load_user(state: &AppState, user_id: DbId) -> Result<AuthUser, AppError> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("user not found".into())))?;

    Ok(AuthUser {
        id: user.id,
        username: user.username,
        email: user.email,
        display_name: user.display_name,
    })
}

/// Extract the token from an `Authorization: Bearer ...` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Extract a named cookie's value from the `Cookie` header.
fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let header = parts.headers.get(COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        let pair = pair.trim();
        if let Some((key, value)) = pair.split_once('=') {
            if key == name && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
