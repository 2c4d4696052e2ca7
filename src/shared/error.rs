//! Shared Error Types
//!
//! Errors that describe bad request input. They are raised by request
//! handlers and converted into 400 responses by `backend::error`.
//!
//! # Usage
//!
//! ```rust
//! use stellar_backend::shared::error::SharedError;
//!
//! let error = SharedError::validation("password", "Password must be at least 6 characters");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// A single field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// One or more required fields were absent or blank
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Names of the missing fields, in request order
        fields: Vec<String>,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing-fields error from field names
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}
