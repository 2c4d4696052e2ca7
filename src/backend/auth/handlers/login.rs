/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * Unknown emails and wrong passwords produce the same 401 so accounts cannot
 * be enumerated.
 */

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::SharedError;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Email or password missing
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Database, bcrypt or token failure
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, BackendError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        let field = if request.email.trim().is_empty() { "email" } else { "password" };
        return Err(SharedError::validation(field, "All fields are required").into());
    }

    let email = request.email.trim().to_lowercase();
    let user = get_user_by_email(&state.db_pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email: {}", email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.sessions.create_token(user.id)?;
    let jar = jar.add(state.sessions.session_cookie(token));

    tracing::info!("User logged in successfully: {}", user.id);

    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            user: user.into(),
        }),
    ))
}
