//! # Order Store
//!
//! Two tables: an order-header table keyed by order id and an order-line table keyed
//! by `(order_id, product_id)`. Writes go in as one atomic unit per order. Reads come
//! back as the flattened header/line join, one [`OrderRow`] per line, sorted by order
//! id and then product id. Callers decode that shape with
//! [`decode_rows`](crate::orders::decode_rows).
//!
//! Two backends implement [`OrderStore`]:
//! - [`MemoryOrderStore`]: an actor owning both tables in process.
//! - [`PgOrderStore`]: Postgres through a shared `sqlx` pool.

mod error;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use memory::{MemoryOrderStore, OrderLedger};
pub use postgres::PgOrderStore;

use crate::model::{Order, OrderId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::time::Instant;

/// One row of the header/line join.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: f64,
    pub product_id: String,
    pub quantity: u32,
}

/// Persistence for orders.
///
/// Implementations are shared by every concurrent request and must serialize
/// conflicting writes themselves.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist the header and every line, or nothing at all.
    async fn put(&self, order: &Order, deadline: Instant) -> Result<(), StoreError>;

    /// All orders of `account_id` as joined rows, sorted by order id.
    async fn get_by_account(
        &self,
        account_id: &str,
        deadline: Instant,
    ) -> Result<Vec<OrderRow>, StoreError>;
}

/// Constraints every backend enforces before writing: at least one line, and no
/// product twice within one order.
pub(crate) fn check_writable(order: &Order) -> Result<(), StoreError> {
    if order.lines.is_empty() {
        return Err(StoreError::PersistFailed(format!(
            "order {} has no lines",
            order.id
        )));
    }
    let mut seen = HashSet::with_capacity(order.lines.len());
    for line in &order.lines {
        if !seen.insert(line.product_id.as_str()) {
            return Err(StoreError::PersistFailed(format!(
                "duplicate line ({}, {})",
                order.id, line.product_id
            )));
        }
    }
    Ok(())
}
