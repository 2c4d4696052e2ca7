/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the auth handlers. Field names are
 * camelCase on the wire; user ids are exposed as `_id`.
 *
 * Request fields default to empty strings so that an absent field is
 * reported as a validation error rather than a body rejection.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    /// Plain-text password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Onboarding request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingRequest {
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
}

impl OnboardingRequest {
    /// Names of the fields left blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("bio", &self.bio),
            ("nativeLanguage", &self.native_language),
            ("learningLanguage", &self.learning_language),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Returned by signup, login, onboarding and me
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// Plain acknowledgement
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub profile_pic: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    pub is_onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            bio: user.bio,
            profile_pic: user.profile_pic.unwrap_or_default(),
            native_language: user.native_language,
            learning_language: user.learning_language,
            location: user.location,
            is_onboarded: user.is_onboarded,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
