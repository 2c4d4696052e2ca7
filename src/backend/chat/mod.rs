//! Chat Module
//!
//! Messages and calls travel directly between browsers and Stream; the
//! backend only issues the Stream user token a browser connects with.
//!
//! - `GET /api/chat/token` - Stream token for the session user

/// Chat handlers
pub mod handlers;

pub use handlers::get_stream_token;
