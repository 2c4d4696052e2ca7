//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are returned from HTTP handlers and converted to HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Response Format
//!
//! Every error becomes a JSON body with the message and the status code:
//!
//! ```json
//! { "error": "Invalid email or password", "status": 401 }
//! ```
//!
//! Internal failures (database, token signing, password hashing) are logged
//! with full detail and reported to the client as a generic message.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
