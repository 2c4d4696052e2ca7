/**
 * Onboarding Handler
 *
 * POST /api/auth/onboarding (protected)
 *
 * Stores the profile form, flags the user as onboarded and refreshes the
 * user's Stream profile so the new display name shows up in chat.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, OnboardingRequest};
use crate::backend::auth::users::{complete_onboarding, OnboardingProfile};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::stream::DirectoryEntry;
use crate::shared::SharedError;

/// Onboarding handler
///
/// # Errors
///
/// * `400 Bad Request` - Any profile field blank; the message lists them
/// * `404 Not Found` - The user disappeared between auth and update
pub async fn onboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(SharedError::missing_fields(missing).into());
    }

    let profile = OnboardingProfile {
        full_name: request.full_name.trim().to_string(),
        bio: request.bio.trim().to_string(),
        native_language: request.native_language.trim().to_string(),
        learning_language: request.learning_language.trim().to_string(),
        location: request.location.trim().to_string(),
    };

    let updated = complete_onboarding(&state.db_pool, user.id, &profile)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if let Err(e) = state.stream.upsert_user(&DirectoryEntry::from(&updated)).await {
        tracing::error!("Error updating Stream user during onboarding: {}", e);
    } else {
        tracing::info!("Stream user updated after onboarding for {}", updated.full_name);
    }

    Ok(Json(AuthResponse {
        success: true,
        user: updated.into(),
    }))
}
