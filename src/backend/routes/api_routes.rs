/**
 * API Route Groups
 *
 * # Routes
 *
 * ## Authentication (`/api/auth`)
 * - `POST /signup` - User registration
 * - `POST /login` - User login
 * - `POST /logout` - Clear the session cookie
 * - `POST /onboarding` - Complete the profile (protected)
 * - `GET /me` - Current user (protected)
 *
 * ## Users (`/api/users`, protected)
 * - `GET /` - Recommended users
 * - `GET /friends` - Friends of the caller
 * - `POST /friend-request/{id}` - Send a friend request
 * - `PUT /friend-request/{id}/accept` - Accept a friend request
 * - `GET /friend-requests` - Incoming and accepted requests
 * - `GET /outgoing-friend-requests` - Pending requests sent by the caller
 *
 * ## Chat (`/api/chat`, protected)
 * - `GET /token` - Stream user token
 *
 * Protection is enforced by the `AuthUser` extractor in each handler.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, logout, onboard, signup};
use crate::backend::chat::get_stream_token;
use crate::backend::server::state::AppState;
use crate::backend::users::{
    accept_friend_request, get_friend_requests, get_my_friends, get_outgoing_friend_requests,
    get_recommended_users, send_friend_request,
};

/// Routes mounted at `/api/auth`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/onboarding", post(onboard))
        .route("/me", get(get_me))
}

/// Routes mounted at `/api/users`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_recommended_users))
        .route("/friends", get(get_my_friends))
        .route("/friend-request/{id}", post(send_friend_request))
        .route("/friend-request/{id}/accept", put(accept_friend_request))
        .route("/friend-requests", get(get_friend_requests))
        .route("/outgoing-friend-requests", get(get_outgoing_friend_requests))
}

/// Routes mounted at `/api/chat`
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/token", get(get_stream_token))
}

/// Mount every API group on `router`
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .nest("/api/auth", auth_routes())
        .nest("/api/users", user_routes())
        .nest("/api/chat", chat_routes())
}
