//! Postgres order store.
//!
//! Expects the tables from `sql/schema.sql`. Each `put` runs in one transaction; any
//! failed statement (or the deadline firing mid-write) drops the transaction, which
//! rolls it back.

use super::{check_writable, OrderRow, OrderStore, StoreError};
use crate::model::{Order, OrderId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const INSERT_ORDER: &str =
    "INSERT INTO orders (id, created_at, account_id, total_price) VALUES ($1, $2, $3, $4)";

const INSERT_LINE: &str =
    "INSERT INTO order_products (order_id, product_id, quantity) VALUES ($1, $2, $3)";

const SELECT_BY_ACCOUNT: &str = "\
    SELECT o.id, o.created_at, o.account_id, o.total_price, op.product_id, op.quantity \
    FROM orders o \
    JOIN order_products op ON o.id = op.order_id \
    WHERE o.account_id = $1 \
    ORDER BY o.id, op.product_id";

#[derive(Debug, FromRow)]
struct JoinedRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    account_id: String,
    total_price: f64,
    product_id: String,
    quantity: i32,
}

impl TryFrom<JoinedRow> for OrderRow {
    type Error = StoreError;

    fn try_from(row: JoinedRow) -> Result<Self, StoreError> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            StoreError::Unavailable(format!(
                "order {} holds invalid quantity {}",
                row.id, row.quantity
            ))
        })?;
        Ok(OrderRow {
            order_id: OrderId(row.id),
            created_at: row.created_at,
            account_id: row.account_id,
            total_price: row.total_price,
            product_id: row.product_id,
            quantity,
        })
    }
}

/// Order store backed by a Postgres connection pool.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        info!(max_connections, "Connected to order database");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Connectivity problems mean the store is unavailable; anything else the database
/// raised while writing aborts the order.
fn classify_write_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
        other => StoreError::PersistFailed(other.to_string()),
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[instrument(skip(self, order, deadline), fields(order_id = %order.id))]
    async fn put(&self, order: &Order, deadline: Instant) -> Result<(), StoreError> {
        check_writable(order)?;

        let write = async {
            let mut tx = self.pool.begin().await.map_err(classify_write_error)?;

            sqlx::query(INSERT_ORDER)
                .bind(order.id.0)
                .bind(order.created_at)
                .bind(&order.account_id)
                .bind(order.total_price)
                .execute(&mut *tx)
                .await
                .map_err(classify_write_error)?;

            for line in &order.lines {
                let quantity = i32::try_from(line.quantity).map_err(|_| {
                    StoreError::PersistFailed(format!(
                        "quantity {} of {} out of range",
                        line.quantity, line.product_id
                    ))
                })?;
                sqlx::query(INSERT_LINE)
                    .bind(order.id.0)
                    .bind(&line.product_id)
                    .bind(quantity)
                    .execute(&mut *tx)
                    .await
                    .map_err(classify_write_error)?;
            }

            tx.commit().await.map_err(classify_write_error)
        };

        match timeout_at(deadline, write).await {
            Ok(Ok(())) => {
                debug!(lines = order.lines.len(), "Order committed");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Order write rolled back");
                Err(e)
            }
            Err(_) => Err(StoreError::Timeout("order_store_put")),
        }
    }

    #[instrument(skip(self, deadline))]
    async fn get_by_account(
        &self,
        account_id: &str,
        deadline: Instant,
    ) -> Result<Vec<OrderRow>, StoreError> {
        let read = sqlx::query_as::<_, JoinedRow>(SELECT_BY_ACCOUNT)
            .bind(account_id)
            .fetch_all(&self.pool);

        let rows = timeout_at(deadline, read)
            .await
            .map_err(|_| StoreError::Timeout("order_store_read"))?
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        debug!(rows = rows.len(), "Read order rows");
        rows.into_iter().map(OrderRow::try_from).collect()
    }
}
