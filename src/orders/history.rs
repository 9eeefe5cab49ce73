use super::{require_account_id, OrderError, OrderService};
use crate::model::{Order, OrderedProduct, Product};
use crate::store::OrderRow;
use std::collections::{BTreeSet, HashMap};
use tokio::time::Instant;
use tracing::{debug, instrument};

impl OrderService {
    /// `GetOrderHistory(accountId)`: every order of the account in id order.
    ///
    /// `total_price` is the value frozen at creation. Line names, descriptions and
    /// unit prices come from the catalog as it is now; lines whose product has since
    /// been removed keep what the order carried.
    #[instrument(skip(self, deadline))]
    pub async fn get_order_history(
        &self,
        account_id: &str,
        deadline: Instant,
    ) -> Result<Vec<Order>, OrderError> {
        let account_id = require_account_id(account_id)?;

        let rows = self.store.get_by_account(account_id, deadline).await?;
        let mut orders = decode_rows(rows);
        if orders.is_empty() {
            return Ok(orders);
        }

        let product_ids: Vec<String> = orders
            .iter()
            .flat_map(|order| order.lines.iter().map(|line| line.product_id.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let products = self.catalog.get_products(&product_ids, deadline).await?;
        refresh_lines(&mut orders, &products);

        debug!(orders = orders.len(), products = products.len(), "History loaded");
        Ok(orders)
    }
}

/// Regroups flattened join rows into orders.
///
/// `rows` must be sorted by order id with the rows of one order adjacent; a new order
/// starts whenever the id changes. Input that breaks this precondition yields
/// unspecified grouping. No rows gives no orders.
pub fn decode_rows(rows: Vec<OrderRow>) -> Vec<Order> {
    let mut orders = Vec::new();
    let mut current: Option<Order> = None;

    for row in rows {
        if current.as_ref().map(|order| order.id) != Some(row.order_id) {
            orders.extend(current.take());
            current = Some(Order {
                id: row.order_id,
                account_id: row.account_id,
                created_at: row.created_at,
                total_price: row.total_price,
                lines: Vec::new(),
            });
        }
        if let Some(order) = current.as_mut() {
            order
                .lines
                .push(OrderedProduct::unpriced(row.product_id, row.quantity));
        }
    }

    orders.extend(current);
    orders
}

/// Overwrites line metadata with the catalog's current values where the product
/// still exists.
pub fn refresh_lines(orders: &mut [Order], products: &[Product]) {
    let catalog: HashMap<&str, &Product> = products.iter().map(|p| (p.id.as_str(), p)).collect();
    for line in orders.iter_mut().flat_map(|order| order.lines.iter_mut()) {
        if let Some(product) = catalog.get(line.product_id.as_str()) {
            line.refresh_from(product);
        }
    }
}
