//! Server Module
//!
//! Startup configuration, shared state and the bootstrap sequence.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig and RunMode
//! └── init.rs         - bootstrap and Server
//! ```
//!
//! # Example
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

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, RunMode, ServerConfig, SyncConfig};
pub use init::{bootstrap, connect_database, connect_pool, warm_up_and_bind, Server, StartupError};
pub use state::AppState;
