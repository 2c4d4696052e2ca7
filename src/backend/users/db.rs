//! Database operations for friendships and friend requests

use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::types::{FriendRequest, FriendRequestStatus};
use crate::backend::auth::users::{User, USER_COLUMNS};

const REQUEST_COLUMNS: &str = "id, sender_id, recipient_id, status, created_at, updated_at";

fn request_from_row(row: &PgRow) -> Result<FriendRequest, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = FriendRequestStatus::parse(&status).ok_or_else(|| {
        sqlx::Error::Decode(format!("unknown friend request status: {}", status).into())
    })?;

    Ok(FriendRequest {
        id: row.try_get("id")?,
        sender_id: row.try_get("sender_id")?,
        recipient_id: row.try_get("recipient_id")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Onboarded users who are neither `user_id` nor already friends with them
pub async fn get_recommended_users(pool: &PgPool, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id <> $1
          AND is_onboarded = TRUE
          AND id NOT IN (SELECT friend_id FROM friendships WHERE user_id = $1)
        ORDER BY created_at DESC
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Friends of `user_id`, by name
pub async fn get_friends(pool: &PgPool, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id IN (SELECT friend_id FROM friendships WHERE user_id = $1)
        ORDER BY full_name ASC
        "#
    );

    sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Load several users at once; missing ids are skipped
pub async fn get_users_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");

    sqlx::query_as::<_, User>(&query)
        .bind(ids)
        .fetch_all(pool)
        .await
}

pub async fn are_friends(pool: &PgPool, user_id: Uuid, other_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM friendships WHERE user_id = $1 AND friend_id = $2
        ) AS friends
        "#,
    )
    .bind(user_id)
    .bind(other_id)
    .fetch_one(pool)
    .await?;

    row.try_get("friends")
}

/// Any request between the two users, in either direction
pub async fn find_request_between(
    pool: &PgPool,
    user_id: Uuid,
    other_id: Uuid,
) -> Result<Option<FriendRequest>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM friend_requests
        WHERE (sender_id = $1 AND recipient_id = $2)
           OR (sender_id = $2 AND recipient_id = $1)
        LIMIT 1
        "#
    );

    let row = sqlx::query(&query)
        .bind(user_id)
        .bind(other_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(request_from_row).transpose()
}

/// Create a new pending friend request
pub async fn create_friend_request(
    pool: &PgPool,
    sender_id: Uuid,
    recipient_id: Uuid,
) -> Result<FriendRequest, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO friend_requests (id, sender_id, recipient_id, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING {REQUEST_COLUMNS}
        "#
    );

    let row = sqlx::query(&query)
        .bind(Uuid::new_v4())
        .bind(sender_id)
        .bind(recipient_id)
        .bind(FriendRequestStatus::Pending.as_str())
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    request_from_row(&row)
}

/// Get a friend request by ID
pub async fn get_friend_request_by_id(
    pool: &PgPool,
    request_id: Uuid,
) -> Result<Option<FriendRequest>, sqlx::Error> {
    let query = format!("SELECT {REQUEST_COLUMNS} FROM friend_requests WHERE id = $1");

    let row = sqlx::query(&query)
        .bind(request_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(request_from_row).transpose()
}

/// Mark a request accepted and record the friendship in both directions
///
/// Runs in one transaction so a request is never accepted without the
/// matching friendship rows.
pub async fn accept_friend_request(
    pool: &PgPool,
    request: &FriendRequest,
) -> Result<FriendRequest, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let query = format!(
        r#"
        UPDATE friend_requests
        SET status = $1, updated_at = $2
        WHERE id = $3
        RETURNING {REQUEST_COLUMNS}
        "#
    );

    let row = sqlx::query(&query)
        .bind(FriendRequestStatus::Accepted.as_str())
        .bind(Utc::now())
        .bind(request.id)
        .fetch_one(&mut *tx)
        .await?;
    let accepted = request_from_row(&row)?;

    sqlx::query(
        r#"
        INSERT INTO friendships (user_id, friend_id, created_at)
        VALUES ($1, $2, NOW()), ($2, $1, NOW())
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(request.sender_id)
    .bind(request.recipient_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(accepted)
}

/// Requests received by `recipient_id` with the given status, newest first
pub async fn get_requests_received(
    pool: &PgPool,
    recipient_id: Uuid,
    status: FriendRequestStatus,
) -> Result<Vec<FriendRequest>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM friend_requests
        WHERE recipient_id = $1 AND status = $2
        ORDER BY created_at DESC
        "#
    );

    let rows = sqlx::query(&query)
        .bind(recipient_id)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?;

    rows.iter().map(request_from_row).collect()
}

/// Requests sent by `sender_id` with the given status, newest first
pub async fn get_requests_sent(
    pool: &PgPool,
    sender_id: Uuid,
    status: FriendRequestStatus,
) -> Result<Vec<FriendRequest>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM friend_requests
        WHERE sender_id = $1 AND status = $2
        ORDER BY created_at DESC
        "#
    );

    let rows = sqlx::query(&query)
        .bind(sender_id)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?;

    rows.iter().map(request_from_row).collect()
}
