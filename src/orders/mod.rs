//! # Order Service
//!
//! The order composition and aggregation engine.
//!
//! - [`OrderService::create_order`] validates the request, checks the account, prices
//!   the items against one bulk catalog lookup and writes the order atomically.
//! - [`OrderService::get_order_history`] reads the flattened join from the store,
//!   regroups it into orders ([`decode_rows`]) and refreshes line metadata from the
//!   catalog.
//!
//! The service holds no mutable state of its own. Clones share the collaborator
//! clients and the store, so every call runs independently.

mod composer;
mod error;
mod history;

pub use composer::compose_lines;
pub use error::OrderError;
pub use history::{decode_rows, refresh_lines};

use crate::clients::{AccountClient, CatalogClient};
use crate::model::{Order, RequestedItem};
use crate::store::OrderStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default per-call budget, matching the gateway in front of the services.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct OrderService {
    accounts: AccountClient,
    catalog: CatalogClient,
    store: Arc<dyn OrderStore>,
    request_timeout: Duration,
}

impl OrderService {
    pub fn new(
        accounts: AccountClient,
        catalog: CatalogClient,
        store: Arc<dyn OrderStore>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            accounts,
            catalog,
            store,
            request_timeout,
        }
    }

    fn default_deadline(&self) -> Instant {
        Instant::now() + self.request_timeout
    }

    /// [`create_order`](Self::create_order) with a deadline `request_timeout` from now.
    pub async fn create_order_with_timeout(
        &self,
        account_id: &str,
        items: &[RequestedItem],
    ) -> Result<Order, OrderError> {
        self.create_order(account_id, items, self.default_deadline())
            .await
    }

    /// [`get_order_history`](Self::get_order_history) with a deadline
    /// `request_timeout` from now.
    pub async fn get_order_history_with_timeout(
        &self,
        account_id: &str,
    ) -> Result<Vec<Order>, OrderError> {
        self.get_order_history(account_id, self.default_deadline())
            .await
    }
}

/// Trimmed, non-empty account id.
fn require_account_id(account_id: &str) -> Result<&str, OrderError> {
    let trimmed = account_id.trim();
    if trimmed.is_empty() {
        return Err(OrderError::InvalidArgument(
            "account id must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
