//! Demo: place an order, change a price, read the history back.
//!
//! The history shows the total frozen at creation next to the catalog's current
//! unit price.

use anyhow::Context;
use order_aggregator::config::OrderServiceConfig;
use order_aggregator::lifecycle::{setup_tracing, OrderSystem};
use order_aggregator::model::{ProductCreate, ProductUpdate, RequestedItem};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = OrderServiceConfig::from_env().context("loading configuration")?;
    let system = OrderSystem::from_config(&config)
        .await
        .context("starting order system")?;

    let account_id = system.accounts.create_account("Alice").await?;
    let lamp = system
        .catalog
        .create_product(ProductCreate {
            name: "Desk lamp".to_string(),
            description: "Brass, 40W".to_string(),
            price: 30.0,
        })
        .await?;
    let bulb = system
        .catalog
        .create_product(ProductCreate {
            name: "Bulb".to_string(),
            description: "Warm white".to_string(),
            price: 2.5,
        })
        .await?;

    let span = tracing::info_span!("order_processing");
    let order = async {
        let items = [
            RequestedItem::new(lamp.clone(), 1),
            RequestedItem::new(bulb.clone(), 4),
            RequestedItem::new("discontinued", 1),
        ];
        system
            .orders
            .create_order_with_timeout(&account_id, &items)
            .await
    }
    .instrument(span)
    .await?;
    info!(order_id = %order.id, total = order.total_price, lines = order.lines.len(), "Order placed");

    system
        .catalog
        .update_product(
            &lamp,
            ProductUpdate {
                price: Some(35.0),
                ..Default::default()
            },
        )
        .await?;

    let history = system
        .orders
        .get_order_history_with_timeout(&account_id)
        .await?;
    for order in &history {
        println!(
            "order {} at {} total {:.2}",
            order.id, order.created_at, order.total_price
        );
        for line in &order.lines {
            println!(
                "  {:>3} x {:<10} now {:.2}",
                line.quantity, line.name, line.unit_price
            );
        }
    }

    system.shutdown().await?;
    info!("Demo complete");
    Ok(())
}
