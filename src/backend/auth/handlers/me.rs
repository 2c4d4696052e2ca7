//! GET /api/auth/me (protected): the user behind the session.

use axum::response::Json;

use crate::backend::auth::handlers::types::AuthResponse;
use crate::backend::middleware::AuthUser;

pub async fn get_me(AuthUser(user): AuthUser) -> Json<AuthResponse> {
    Json(AuthResponse {
        success: true,
        user: user.into(),
    })
}
