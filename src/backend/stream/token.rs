/**
 * Stream Token Signing
 *
 * Stream authenticates server-side calls with a JWT whose only claim is
 * `server: true`, and client connections with a JWT carrying `user_id`.
 * Both are HS256-signed with the application's API secret.
 */

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Claims of a server-side token
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerClaims {
    pub server: bool,
}

/// Claims of a client token
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Sign a server-side token
pub fn server_token(api_secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let key = EncodingKey::from_secret(api_secret.as_bytes());
    encode(&Header::default(), &ServerClaims { server: true }, &key)
}

/// Sign a client token for `user_id`
pub fn user_token(api_secret: &str, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = UserClaims {
        user_id: user_id.to_string(),
        iat: Utc::now().timestamp(),
    };
    let key = EncodingKey::from_secret(api_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}
