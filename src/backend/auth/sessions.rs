/**
 * Session Management and JWT Tokens
 *
 * Sessions are stateless: a signed JWT carrying the user id lives in an
 * HttpOnly `jwt` cookie for seven days.
 */

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "jwt";

/// Session lifetime in seconds (7 days)
pub const SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signing secret plus cookie policy for session tokens
#[derive(Clone)]
pub struct SessionKeys {
    secret: String,
    secure_cookies: bool,
}

impl SessionKeys {
    /// # Arguments
    /// * `secret` - HMAC secret used to sign and verify tokens
    /// * `secure_cookies` - Mark the cookie `Secure` (production only)
    pub fn new(secret: impl Into<String>, secure_cookies: bool) -> Self {
        Self {
            secret: secret.into(),
            secure_cookies,
        }
    }

    /// Create a JWT token for a user
    pub fn create_token(&self, user_id: uuid::Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + SESSION_TTL_SECS,
            iat: now,
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &key)
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Build the session cookie carrying `token`
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
            .path("/")
            .build()
    }

    /// Cookie used to remove the session on logout
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }
}
