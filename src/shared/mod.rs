//! Shared Module
//!
//! Request validation errors raised by handlers.

/// Shared error types
pub mod error;

pub use error::SharedError;
