/**
 * Authentication Extractor
 *
 * Protected handlers take an `AuthUser` argument. Extraction:
 * 1. Reads the `jwt` session cookie (or an `Authorization: Bearer` header)
 * 2. Verifies the token
 * 3. Loads the user from the database
 *
 * Any failure rejects the request with 401 before the handler runs.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::backend::auth::sessions::SESSION_COOKIE;
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// The user behind the current session
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Pull the raw session token out of the request, cookie first
fn session_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or_else(|| {
            tracing::debug!("Missing session token");
            BackendError::unauthorized("Unauthorized - No token provided")
        })?;

        let claims = state.sessions.verify_token(&token).map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            BackendError::unauthorized("Unauthorized - Invalid token")
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
            tracing::warn!("Invalid user ID in token: {:?}", e);
            BackendError::unauthorized("Unauthorized - Invalid token")
        })?;

        let user = get_user_by_id(&state.db_pool, user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Token for unknown user: {}", user_id);
                BackendError::unauthorized("Unauthorized - User not found")
            })?;

        Ok(AuthUser(user))
    }
}
