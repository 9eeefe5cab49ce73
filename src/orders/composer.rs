use super::{require_account_id, OrderError, OrderService};
use crate::model::{Order, OrderedProduct, Product, RequestedItem};
use std::collections::{HashMap, HashSet};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

impl OrderService {
    /// `CreateOrder(accountId, items)`.
    ///
    /// Strict order of work: validation, account lookup, one bulk catalog lookup,
    /// store write. Any failure stops the call before the next step, so a failed
    /// lookup never reaches the store.
    #[instrument(skip(self, items, deadline), fields(items = items.len()))]
    pub async fn create_order(
        &self,
        account_id: &str,
        items: &[RequestedItem],
        deadline: Instant,
    ) -> Result<Order, OrderError> {
        let account_id = require_account_id(account_id)?;
        validate_items(items)?;
        debug!(?items, "Creating order");

        let account = self.accounts.get_account(account_id, deadline).await?;

        let product_ids = distinct_product_ids(items);
        let products = self.catalog.get_products(&product_ids, deadline).await?;

        let lines = compose_lines(items, &products);
        if lines.len() < product_ids.len() {
            // Unmatched products are dropped without failing the call.
            warn!(
                requested = product_ids.len(),
                matched = lines.len(),
                "Dropping products missing from the catalog"
            );
        }
        if lines.is_empty() {
            return Err(OrderError::InvalidArgument(
                "none of the requested products exist".to_string(),
            ));
        }

        let order = Order::place(account.id, lines);
        self.store.put(&order, deadline).await?;

        info!(order_id = %order.id, total = order.total_price, lines = order.lines.len(), "Order created");
        Ok(order)
    }
}

fn validate_items(items: &[RequestedItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::InvalidArgument(
            "an order needs at least one item".to_string(),
        ));
    }
    if let Some(bad) = items.iter().find(|item| item.quantity <= 0) {
        return Err(OrderError::InvalidArgument(format!(
            "quantity for {} must be positive, got {}",
            bad.product_id, bad.quantity
        )));
    }
    Ok(())
}

/// Requested product ids without duplicates, in request order.
fn distinct_product_ids(items: &[RequestedItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.product_id.as_str()))
        .map(|item| item.product_id.clone())
        .collect()
}

/// Prices the requested items against catalog data.
///
/// Lines follow request order. A product requested twice keeps its first entry.
/// Items with no catalog match or a non-positive quantity are dropped.
pub fn compose_lines(requested: &[RequestedItem], products: &[Product]) -> Vec<OrderedProduct> {
    let mut catalog: HashMap<&str, &Product> = HashMap::with_capacity(products.len());
    for product in products {
        catalog.entry(product.id.as_str()).or_insert(product);
    }

    let mut seen = HashSet::new();
    requested
        .iter()
        .filter(|item| seen.insert(item.product_id.as_str()))
        .filter_map(|item| {
            let quantity = u32::try_from(item.quantity).ok().filter(|q| *q > 0)?;
            let product = catalog.get(item.product_id.as_str())?;
            Some(OrderedProduct::from_catalog(product, quantity))
        })
        .collect()
}
