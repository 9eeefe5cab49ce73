use thiserror::Error;

/// Errors raised by an [`OrderStore`](super::OrderStore).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The store could not be reached (closed actor, lost connection, pool exhausted).
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    /// The write was rejected and rolled back; nothing was committed.
    #[error("Order write aborted: {0}")]
    PersistFailed(String),

    /// The caller's deadline passed during the named step.
    #[error("Order store timed out during {0}")]
    Timeout(&'static str),
}
