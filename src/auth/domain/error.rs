//! Error types for account validation and parsing.

use thiserror::Error;

/// Errors returned while constructing account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthDomainError {
    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is shorter than the accepted minimum.
    #[error("password must be at least {min_length} characters long")]
    WeakPassword {
        /// Minimum accepted number of characters.
        min_length: usize,
    },
}

/// Error returned while parsing roles from persistence or tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
