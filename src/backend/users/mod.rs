//! Users Module
//!
//! Friend discovery and friend requests, mounted under `/api/users`. Every
//! route requires a session.
//!
//! # Routes
//!
//! - `GET /` - recommended users
//! - `GET /friends` - the caller's friends
//! - `POST /friend-request/{id}` - send a request
//! - `PUT /friend-request/{id}/accept` - accept a request
//! - `GET /friend-requests` - incoming and recently accepted requests
//! - `GET /outgoing-friend-requests` - pending requests the caller sent

/// Database operations for friendships and friend requests
pub mod db;

/// Request and response types
pub mod types;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    accept_friend_request, get_friend_requests, get_my_friends, get_outgoing_friend_requests,
    get_recommended_users, send_friend_request,
};
