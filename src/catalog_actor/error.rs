//! Error types for the Catalog service.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product data provided is invalid (empty name, negative price, ...).
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// The caller's deadline passed before the service answered.
    #[error("Catalog service timed out during {0}")]
    Timeout(&'static str),

    /// An error occurred while communicating with the catalog actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
