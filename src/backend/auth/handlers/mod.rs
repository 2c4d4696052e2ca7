//! Authentication Handlers Module
//!
//! HTTP handlers mounted under `/api/auth`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs         - Module exports and documentation
//! ├── types.rs       - Request and response types
//! ├── signup.rs      - POST /signup
//! ├── login.rs       - POST /login
//! ├── logout.rs      - POST /logout
//! ├── onboarding.rs  - POST /onboarding (protected)
//! └── me.rs          - GET /me (protected)
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Onboarding handler
pub mod onboarding;

/// Get current user handler
pub mod me;

pub use types::{
    AuthResponse, LoginRequest, MessageResponse, OnboardingRequest, SignupRequest, UserResponse,
};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use onboarding::onboard;
pub use signup::signup;
