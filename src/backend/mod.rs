//! Backend Module
//!
//! All server-side code for the Stellar chat backend: an Axum HTTP server
//! for accounts, friends and chat tokens, plus the routine that mirrors
//! local users into the Stream chat/video directory.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, bootstrap
//! - **`routes`** - Router assembly, security headers, CORS
//! - **`auth`** - Accounts, sessions, `/api/auth` handlers
//! - **`users`** - Friends and friend requests, `/api/users` handlers
//! - **`chat`** - Stream token endpoint, `/api/chat`
//! - **`stream`** - Stream REST client and token signing
//! - **`sync`** - User directory synchronizer
//! - **`middleware`** - Session extractor
//! - **`error`** - Handler error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - stellar-server binary
//! ├── bin/            - sync-stream-users binary
//! ├── server/         - Configuration, state and bootstrap
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── users/          - Friend system
//! ├── chat/           - Chat token
//! ├── stream/         - Stream client
//! ├── sync/           - Directory synchronizer
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the database pool, the Stream client and the session
//! keys. Each is created once by `bootstrap` and cloned into handlers.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user accounts
pub mod auth;

/// Friend system
pub mod users;

/// Chat token endpoint
pub mod chat;

/// Stream REST client
pub mod stream;

/// Stream user directory synchronizer
pub mod sync;

/// Backend error types
pub mod error;

/// Request extractors
pub mod middleware;

pub use error::BackendError;
pub use server::{bootstrap, ServerConfig};
pub use sync::{sync_stream_users, SyncOutcome};
