//! In-process order store.
//!
//! [`OrderLedger`] owns both tables and applies one request at a time, so a `Put`
//! is checked completely before any row is written and concurrent writers never
//! interleave. [`MemoryOrderStore`] is the cloneable handle.
//!
//! A `Put` whose caller timed out leaves nothing behind. The caller closes its
//! reply channel on expiry, and the ledger undoes any write it can no longer report.

use super::{check_writable, OrderRow, OrderStore, StoreError};
use crate::model::{Order, OrderId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
enum LedgerRequest {
    Put {
        order: Order,
        deadline: Instant,
        respond_to: oneshot::Sender<Result<(), StoreError>>,
    },
    GetByAccount {
        account_id: String,
        respond_to: oneshot::Sender<Vec<OrderRow>>,
    },
    CountOrders {
        respond_to: oneshot::Sender<usize>,
    },
}

#[derive(Debug, Clone)]
struct Header {
    created_at: DateTime<Utc>,
    account_id: String,
    total_price: f64,
}

/// The actor half of the in-memory store.
pub struct OrderLedger {
    receiver: mpsc::Receiver<LedgerRequest>,
    headers: BTreeMap<OrderId, Header>,
    lines: BTreeMap<(OrderId, String), u32>,
}

impl OrderLedger {
    pub fn new(buffer_size: usize) -> (Self, MemoryOrderStore) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let ledger = Self {
            receiver,
            headers: BTreeMap::new(),
            lines: BTreeMap::new(),
        };
        (ledger, MemoryOrderStore { sender })
    }

    pub async fn run(mut self) {
        info!("Order ledger started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Put {
                    order,
                    deadline,
                    respond_to,
                } => {
                    let order_id = order.id;
                    if respond_to.is_closed() {
                        warn!(%order_id, "Caller left before the write; skipped");
                        continue;
                    }
                    let result = self.put(order, deadline);
                    let written = result.is_ok();
                    // A reply nobody can receive means the caller reported a timeout.
                    if respond_to.send(result).is_err() && written {
                        self.remove_order(order_id);
                        warn!(%order_id, "Caller left before the reply; write undone");
                    }
                }
                LedgerRequest::GetByAccount {
                    account_id,
                    respond_to,
                } => {
                    let rows = self.rows_for(&account_id);
                    debug!(%account_id, rows = rows.len(), "GetByAccount");
                    let _ = respond_to.send(rows);
                }
                LedgerRequest::CountOrders { respond_to } => {
                    let _ = respond_to.send(self.headers.len());
                }
            }
        }

        info!(orders = self.headers.len(), "Order ledger shutdown");
    }

    fn put(&mut self, order: Order, deadline: Instant) -> Result<(), StoreError> {
        // The caller may have given up while the request sat in the queue.
        if Instant::now() >= deadline {
            warn!(order_id = %order.id, "Put arrived after its deadline");
            return Err(StoreError::Timeout("order_store_put"));
        }
        check_writable(&order)?;
        if self.headers.contains_key(&order.id) {
            warn!(order_id = %order.id, "Duplicate order id");
            return Err(StoreError::PersistFailed(format!(
                "duplicate order id {}",
                order.id
            )));
        }

        for line in &order.lines {
            self.lines
                .insert((order.id, line.product_id.clone()), line.quantity);
        }
        self.headers.insert(
            order.id,
            Header {
                created_at: order.created_at,
                account_id: order.account_id,
                total_price: order.total_price,
            },
        );
        info!(order_id = %order.id, lines = order.lines.len(), "Order stored");
        Ok(())
    }

    fn remove_order(&mut self, order_id: OrderId) {
        self.headers.remove(&order_id);
        self.lines.retain(|(line_order, _), _| *line_order != order_id);
    }

    fn rows_for(&self, account_id: &str) -> Vec<OrderRow> {
        self.headers
            .iter()
            .filter(|(_, header)| header.account_id == account_id)
            .flat_map(|(order_id, header)| {
                self.lines
                    .range((*order_id, String::new())..)
                    .take_while(move |((line_order, _), _)| line_order == order_id)
                    .map(move |((_, product_id), quantity)| OrderRow {
                        order_id: *order_id,
                        created_at: header.created_at,
                        account_id: header.account_id.clone(),
                        total_price: header.total_price,
                        product_id: product_id.clone(),
                        quantity: *quantity,
                    })
            })
            .collect()
    }
}

/// Cloneable handle to a running [`OrderLedger`].
#[derive(Clone)]
pub struct MemoryOrderStore {
    sender: mpsc::Sender<LedgerRequest>,
}

impl MemoryOrderStore {
    /// Number of order headers held by the ledger.
    pub async fn count_orders(&self) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::CountOrders { respond_to })
            .await
            .map_err(|_| closed())?;
        response.await.map_err(|_| closed())
    }
}

fn closed() -> StoreError {
    StoreError::Unavailable("order ledger closed".to_string())
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    #[instrument(skip(self, order, deadline), fields(order_id = %order.id))]
    async fn put(&self, order: &Order, deadline: Instant) -> Result<(), StoreError> {
        let (respond_to, mut response) = oneshot::channel();
        let request = LedgerRequest::Put {
            order: order.clone(),
            deadline,
            respond_to,
        };
        timeout_at(deadline, self.sender.send(request))
            .await
            .map_err(|_| StoreError::Timeout("order_store_put"))?
            .map_err(|_| closed())?;

        match timeout_at(deadline, &mut response).await {
            Ok(reply) => reply.map_err(|_| closed())?,
            Err(_) => {
                // After `close` the ledger either has already replied, and that reply
                // stands, or fails to reply and undoes the write.
                response.close();
                match response.try_recv() {
                    Ok(reply) => reply,
                    Err(_) => Err(StoreError::Timeout("order_store_put")),
                }
            }
        }
    }

    #[instrument(skip(self, deadline))]
    async fn get_by_account(
        &self,
        account_id: &str,
        deadline: Instant,
    ) -> Result<Vec<OrderRow>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        let request = LedgerRequest::GetByAccount {
            account_id: account_id.to_string(),
            respond_to,
        };
        let exchange = async {
            self.sender.send(request).await.map_err(|_| closed())?;
            response.await.map_err(|_| closed())
        };
        timeout_at(deadline, exchange)
            .await
            .map_err(|_| StoreError::Timeout("order_store_read"))?
    }
}
