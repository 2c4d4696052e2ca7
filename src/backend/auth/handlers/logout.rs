//! Logout handler: POST /api/auth/logout clears the session cookie.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::sessions::SessionKeys;

pub async fn logout(State(sessions): State<SessionKeys>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(sessions.removal_cookie()),
        Json(MessageResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    )
}
