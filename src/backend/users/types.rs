//! Wire types for the friend endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

/// Status of a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }
}

/// Friend request row
#[derive(Debug, Clone)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile shown in friend lists and request cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub profile_pic: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            profile_pic: user.profile_pic.unwrap_or_default(),
            bio: user.bio,
            native_language: user.native_language,
            learning_language: user.learning_language,
            location: user.location,
        }
    }
}

/// Friend request as returned to clients
///
/// `sender` / `recipient` hold the full profile on whichever side the
/// listing is about, and the bare id on the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub sender: ProfileOrId,
    pub recipient: ProfileOrId,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileOrId {
    Profile(PublicProfile),
    Id(String),
}

impl FriendRequestResponse {
    pub fn new(request: &FriendRequest, sender: ProfileOrId, recipient: ProfileOrId) -> Self {
        Self {
            id: request.id.to_string(),
            sender,
            recipient,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }

    /// Both sides as bare ids
    pub fn bare(request: &FriendRequest) -> Self {
        Self::new(
            request,
            ProfileOrId::Id(request.sender_id.to_string()),
            ProfileOrId::Id(request.recipient_id.to_string()),
        )
    }
}

/// Body of `GET /friend-requests`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestsResponse {
    pub incoming_reqs: Vec<FriendRequestResponse>,
    pub accepted_reqs: Vec<FriendRequestResponse>,
}

/// Body of `PUT /friend-request/{id}/accept`
#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptResponse {
    pub message: String,
}
