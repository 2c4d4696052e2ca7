//! Friend HTTP Handlers
//!
//! All handlers take `AuthUser`, so an unauthenticated request never
//! reaches them.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use super::types::{
    AcceptResponse, FriendRequest, FriendRequestResponse, FriendRequestStatus,
    FriendRequestsResponse, ProfileOrId, PublicProfile,
};
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

fn parse_id(raw: &str, what: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::bad_request(format!("Invalid {} id", what)))
}

/// Load the profiles referenced by `ids`, keyed by id
async fn profiles_by_id(pool: &PgPool, ids: Vec<Uuid>) -> Result<HashMap<Uuid, User>, BackendError> {
    let users = db::get_users_by_ids(pool, &ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

/// Expand the sender side of each request into a profile
async fn with_sender_profiles(
    pool: &PgPool,
    requests: Vec<FriendRequest>,
) -> Result<Vec<FriendRequestResponse>, BackendError> {
    let profiles = profiles_by_id(pool, requests.iter().map(|r| r.sender_id).collect()).await?;

    Ok(requests
        .iter()
        .filter_map(|request| {
            let sender = profiles.get(&request.sender_id).cloned().or_else(|| {
                tracing::warn!("Friend request {} references missing sender", request.id);
                None
            })?;
            Some(FriendRequestResponse::new(
                request,
                ProfileOrId::Profile(sender.into()),
                ProfileOrId::Id(request.recipient_id.to_string()),
            ))
        })
        .collect())
}

/// Expand the recipient side of each request into a profile
async fn with_recipient_profiles(
    pool: &PgPool,
    requests: Vec<FriendRequest>,
) -> Result<Vec<FriendRequestResponse>, BackendError> {
    let profiles =
        profiles_by_id(pool, requests.iter().map(|r| r.recipient_id).collect()).await?;

    Ok(requests
        .iter()
        .filter_map(|request| {
            let recipient = profiles.get(&request.recipient_id).cloned().or_else(|| {
                tracing::warn!("Friend request {} references missing recipient", request.id);
                None
            })?;
            Some(FriendRequestResponse::new(
                request,
                ProfileOrId::Id(request.sender_id.to_string()),
                ProfileOrId::Profile(recipient.into()),
            ))
        })
        .collect())
}

/// GET /api/users
pub async fn get_recommended_users(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PublicProfile>>, BackendError> {
    let users = db::get_recommended_users(&pool, user.id).await?;
    Ok(Json(users.into_iter().map(PublicProfile::from).collect()))
}

/// GET /api/users/friends
pub async fn get_my_friends(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PublicProfile>>, BackendError> {
    let friends = db::get_friends(&pool, user.id).await?;
    Ok(Json(friends.into_iter().map(PublicProfile::from).collect()))
}

/// POST /api/users/friend-request/{id}
///
/// # Errors
///
/// * `400 Bad Request` - Self request, already friends, or a request already
///   exists in either direction
/// * `404 Not Found` - Recipient does not exist
pub async fn send_friend_request(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(recipient_id): Path<String>,
) -> Result<(StatusCode, Json<FriendRequestResponse>), BackendError> {
    let recipient_id = parse_id(&recipient_id, "user")?;

    if recipient_id == user.id {
        return Err(BackendError::bad_request("You can't send friend request to yourself"));
    }

    if get_user_by_id(&pool, recipient_id).await?.is_none() {
        return Err(BackendError::not_found("Recipient not found"));
    }

    if db::are_friends(&pool, user.id, recipient_id).await? {
        return Err(BackendError::bad_request("You are already friends with this user"));
    }

    if db::find_request_between(&pool, user.id, recipient_id).await?.is_some() {
        return Err(BackendError::bad_request(
            "A friend request already exists between you and this user",
        ));
    }

    let request = db::create_friend_request(&pool, user.id, recipient_id).await?;
    tracing::info!("Friend request {} sent from {} to {}", request.id, user.id, recipient_id);

    Ok((StatusCode::CREATED, Json(FriendRequestResponse::bare(&request))))
}

/// PUT /api/users/friend-request/{id}/accept
///
/// # Errors
///
/// * `403 Forbidden` - The caller is not the recipient
/// * `404 Not Found` - No such request
pub async fn accept_friend_request(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(request_id): Path<String>,
) -> Result<Json<AcceptResponse>, BackendError> {
    let request_id = parse_id(&request_id, "friend request")?;

    let request = db::get_friend_request_by_id(&pool, request_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Friend request not found"))?;

    if request.recipient_id != user.id {
        return Err(BackendError::forbidden("You are not authorized to accept this request"));
    }

    db::accept_friend_request(&pool, &request).await?;
    tracing::info!("Friend request {} accepted by {}", request.id, user.id);

    Ok(Json(AcceptResponse {
        message: "Friend request accepted".to_string(),
    }))
}

/// GET /api/users/friend-requests
pub async fn get_friend_requests(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<FriendRequestsResponse>, BackendError> {
    let incoming = db::get_requests_received(&pool, user.id, FriendRequestStatus::Pending).await?;
    let accepted = db::get_requests_sent(&pool, user.id, FriendRequestStatus::Accepted).await?;

    Ok(Json(FriendRequestsResponse {
        incoming_reqs: with_sender_profiles(&pool, incoming).await?,
        accepted_reqs: with_recipient_profiles(&pool, accepted).await?,
    }))
}

/// GET /api/users/outgoing-friend-requests
pub async fn get_outgoing_friend_requests(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<FriendRequestResponse>>, BackendError> {
    let outgoing = db::get_requests_sent(&pool, user.id, FriendRequestStatus::Pending).await?;
    Ok(Json(with_recipient_profiles(&pool, outgoing).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("not-a-uuid", "user").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid user id");
    }

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "user").unwrap(), id);
    }
}
