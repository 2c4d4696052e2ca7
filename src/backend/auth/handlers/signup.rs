/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * # Registration Process
 *
 * 1. Validate that every field is present, the email looks like an address
 *    and the password is at least 6 characters
 * 2. Reject emails that are already registered
 * 3. Hash the password and pick a random avatar
 * 4. Create the user
 * 5. Push the new profile to Stream (failures are logged, not returned)
 * 6. Set the session cookie and return the user
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::{hash, DEFAULT_COST};
use uuid::Uuid;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::stream::DirectoryEntry;
use crate::shared::SharedError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Basic shape check: one `@`, a non-empty local part and a dotted domain
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Random avatar from the public avatar service, index 1..=100
pub(crate) fn random_avatar() -> String {
    let index = Uuid::new_v4().as_u128() % 100 + 1;
    format!("https://avatar.iran.liara.run/public/{}.png", index)
}

const EMAIL_TAKEN: &str = "Email already exists, please use a different one";

/// Check the signup form and return the normalized email
///
/// Password length is counted in characters, not bytes.
pub(crate) fn validate_signup(request: &SignupRequest) -> Result<String, SharedError> {
    for (field, value) in [
        ("fullName", request.full_name.trim()),
        ("email", request.email.trim()),
        ("password", request.password.as_str()),
    ] {
        if value.is_empty() {
            return Err(SharedError::validation(field, "All fields are required"));
        }
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    let email = request.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(SharedError::validation("email", "Invalid email format"));
    }

    Ok(email)
}

/// A concurrent signup can pass the lookup and still lose on the unique index
fn map_insert_error(err: sqlx::Error) -> BackendError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::warn!("Email taken during insert: {}", db.message());
            BackendError::bad_request(EMAIL_TAKEN)
        }
        _ => err.into(),
    }
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing field, malformed email, short password or
///   email already registered
/// * `500 Internal Server Error` - Hashing, database or token failure
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, BackendError> {
    let email = validate_signup(&request).inspect_err(|e| tracing::warn!("Signup rejected: {}", e))?;

    if get_user_by_email(&state.db_pool, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::bad_request(EMAIL_TAKEN));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;
    let user = create_user(
        &state.db_pool,
        request.full_name.trim(),
        &email,
        &password_hash,
        &random_avatar(),
    )
    .await
    .map_err(map_insert_error)?;

    match state.stream.upsert_user(&DirectoryEntry::from(&user)).await {
        Ok(()) => tracing::info!("Stream user created for {}", user.full_name),
        Err(e) => tracing::error!("Error creating Stream user: {}", e),
    }

    let token = state.sessions.create_token(user.id)?;
    let jar = jar.add(state.sessions.session_cookie(token));

    tracing::info!("User created successfully: {}", user.id);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            success: true,
            user: user.into(),
        }),
    ))
}
