//! Middleware Module
//!
//! Request processing shared by the protected route groups.
//!
//! - **`auth`** - `AuthUser` extractor resolving the session cookie to a user

/// Session authentication
pub mod auth;

pub use auth::AuthUser;
