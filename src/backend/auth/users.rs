/**
 * User Model and Database Operations
 *
 * This module owns the `users` table: account creation, lookups, the
 * onboarding update and the full ordered scan used by the Stream directory
 * synchronizer.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::stream::DirectoryEntry;

pub(crate) const USER_COLUMNS: &str = "id, full_name, email, password_hash, bio, profile_pic, \
    native_language, learning_language, location, is_onboarded, created_at, updated_at";

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub bio: String,
    /// Profile image URI
    pub profile_pic: Option<String>,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    /// Set once the user has completed the onboarding form
    pub is_onboarded: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for DirectoryEntry {
    fn from(user: &User) -> Self {
        DirectoryEntry::new(
            user.id.to_string(),
            user.full_name.clone(),
            user.profile_pic.as_deref(),
        )
    }
}

/// Profile fields submitted through onboarding
#[derive(Debug, Clone)]
pub struct OnboardingProfile {
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `full_name` - Display name
/// * `email` - User email
/// * `password_hash` - Hashed password
/// * `profile_pic` - Avatar URI assigned at signup
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    password_hash: &str,
    profile_pic: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let query = format!(
        r#"
        INSERT INTO users (id, full_name, email, password_hash, profile_pic, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(profile_pic)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

    sqlx::query_as::<_, User>(&query)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Load every user, oldest first
///
/// The order is stable across calls (`created_at`, then `id`), so repeated
/// directory syncs over an unchanged table send identical batches.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC");

    sqlx::query_as::<_, User>(&query).fetch_all(pool).await
}

/// Store onboarding answers and mark the user onboarded
///
/// # Returns
/// Updated user, or None if the user no longer exists
pub async fn complete_onboarding(
    pool: &PgPool,
    user_id: Uuid,
    profile: &OnboardingProfile,
) -> Result<Option<User>, sqlx::Error> {
    let query = format!(
        r#"
        UPDATE users
        SET full_name = $1, bio = $2, native_language = $3, learning_language = $4,
            location = $5, is_onboarded = TRUE, updated_at = $6
        WHERE id = $7
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.native_language)
        .bind(&profile.learning_language)
        .bind(&profile.location)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
