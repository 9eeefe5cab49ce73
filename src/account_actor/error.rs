//! Error types for the Account service.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account does not exist.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The account data provided is invalid.
    #[error("Account validation error: {0}")]
    ValidationError(String),

    /// The caller's deadline passed before the service answered.
    #[error("Account service timed out during {0}")]
    Timeout(&'static str),

    /// An error occurred while communicating with the account actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

