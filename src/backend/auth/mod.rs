//! Authentication Module
//!
//! User accounts, session tokens and the `/api/auth` handlers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT session tokens and the session cookie
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email and password → user created → Stream profile
//!    pushed → session cookie set
//! 2. **Login**: email and password verified → session cookie set
//! 3. **Onboarding**: profile completed → Stream profile refreshed
//! 4. **Logout**: session cookie cleared
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Session tokens are HS256 JWTs in an HttpOnly, SameSite=Strict cookie
//! - Tokens expire after 7 days
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, onboard, signup};
pub use sessions::SessionKeys;
pub use users::User;
