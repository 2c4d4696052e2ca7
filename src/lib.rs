//! Stellar - Chat Backend Library
//!
//! Stellar is the HTTP backend for a chat and video collaboration web
//! application. Real-time chat and calls are delegated to Stream; this crate
//! owns accounts, sessions, friendships and keeps Stream's user directory in
//! step with the local user table.
//!
//! # Module Structure
//!
//! - **`shared`** - Error types shared by handlers and background routines
//! - **`backend`** - Axum server, routes, database access, Stream client and
//!   the user directory synchronizer
//!
//! # Usage
//!
//! ```rust,no_run
//! use stellar_backend::backend::server::{bootstrap, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let server = bootstrap(config).await?;
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Binaries
//!
//! - `stellar-server` - the HTTP server
//! - `sync-stream-users` - a one-shot push of every user into Stream

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
