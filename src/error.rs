//! Error types for the admin console client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use charity_admin::{BearerToken, ConfigError};
//!
//! let result = BearerToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBearerToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Bearer token cannot be empty.
    #[error("Bearer token cannot be empty. Log in again to obtain a session token.")]
    EmptyBearerToken,

    /// GraphQL endpoint URL is invalid.
    #[error("Invalid GraphQL endpoint '{url}'. Expected an http(s) URL (e.g., 'http://localhost:4000/graphql').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Uploads base URL is invalid.
    #[error("Invalid uploads base URL '{url}'. Expected an http(s) URL (e.g., 'http://localhost:4000').")]
    InvalidUploadsBase {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Staff role is not recognized.
    #[error("Unknown staff role '{role}'. Expected 'admin' or 'staff'.")]
    InvalidStaffRole {
        /// The role string that was provided.
        role: String,
    },
}
