/**
 * Chat Token Handler
 *
 * GET /api/chat/token (protected)
 *
 * Returns a Stream user token for the session user. The token is signed
 * with the Stream API secret, which never leaves the server.
 */

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::stream::StreamClient;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn get_stream_token(
    State(stream): State<StreamClient>,
    AuthUser(user): AuthUser,
) -> Result<Json<TokenResponse>, BackendError> {
    let token = stream.create_user_token(&user.id.to_string())?;
    Ok(Json(TokenResponse { token }))
}
