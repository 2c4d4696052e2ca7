//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and fallback
//! ├── api_routes.rs   - /api/auth, /api/users and /api/chat groups
//! └── security.rs     - Security headers and CORS
//! ```

/// Main router creation
pub mod router;

/// API endpoint groups
pub mod api_routes;

/// Security headers and CORS
pub mod security;

pub use router::create_router;
