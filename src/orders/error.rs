//! Error types for the order service.

use crate::account_actor::AccountError;
use crate::catalog_actor::CatalogError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors returned by [`OrderService`](super::OrderService).
///
/// Every variant means nothing was created; there is no partial-success shape.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Empty account id, empty item list, non-positive quantity, or no requested
    /// product left after matching against the catalog.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The account service answered that the account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The account service could not be reached.
    #[error("Account service unavailable: {0}")]
    AccountUnavailable(String),

    /// The catalog lookup failed at the transport level.
    #[error("Products lookup failed: {0}")]
    ProductsNotFound(String),

    /// The atomic order write was aborted.
    #[error("Order persist failed: {0}")]
    OrderPersistFailed(String),

    /// The order store could not be reached.
    #[error("Order store unavailable: {0}")]
    OrderStoreUnavailable(String),

    /// The deadline passed during the named step.
    #[error("Deadline exceeded during {0}")]
    Timeout(&'static str),
}

impl From<AccountError> for OrderError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => OrderError::AccountNotFound(id),
            AccountError::Timeout(_) => OrderError::Timeout("account_lookup"),
            other => OrderError::AccountUnavailable(other.to_string()),
        }
    }
}

impl From<CatalogError> for OrderError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Timeout(_) => OrderError::Timeout("catalog_lookup"),
            other => OrderError::ProductsNotFound(other.to_string()),
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => OrderError::OrderStoreUnavailable(msg),
            StoreError::PersistFailed(msg) => OrderError::OrderPersistFailed(msg),
            StoreError::Timeout(step) => OrderError::Timeout(step),
        }
    }
}
