//! Stream Module
//!
//! Server-side client for the Stream chat/video REST API.
//!
//! # Module Structure
//!
//! ```text
//! stream/
//! ├── mod.rs     - Module exports, credentials and error type
//! ├── models.rs  - Directory entries and request payloads
//! ├── token.rs   - Server and user token signing
//! └── client.rs  - Typed reqwest wrapper
//! ```
//!
//! # Authentication
//!
//! Every server-side request carries the API key as a query parameter and a
//! server token (an HS256 JWT signed with the API secret) in the
//! `Authorization` header, together with `stream-auth-type: jwt`.
//!
//! Browsers connect to Stream directly with a per-user token minted by
//! [`StreamClient::create_user_token`] and handed out by `GET /api/chat/token`.

use std::fmt;

use thiserror::Error;

/// Directory entries and request payloads
pub mod models;

/// Token signing
pub mod token;

/// HTTP client
pub mod client;

pub use client::StreamClient;
pub use models::DirectoryEntry;

/// API key and secret for a Stream application
#[derive(Clone, PartialEq, Eq)]
pub struct StreamCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl StreamCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for StreamCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Errors returned by the Stream client
#[derive(Debug, Error)]
pub enum StreamError {
    /// The request never produced a response (DNS, TLS, connection reset)
    #[error("Stream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Stream answered with a non-success status
    #[error("Stream API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// A server or user token could not be signed
    #[error("Stream token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
