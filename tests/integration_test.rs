use order_aggregator::account_actor::AccountError;
use order_aggregator::lifecycle::OrderSystem;
use order_aggregator::model::{Page, ProductCreate, ProductUpdate, RequestedItem};
use order_aggregator::orders::OrderError;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::time::Instant;

async fn add_product(system: &OrderSystem, name: &str, price: f64) -> String {
    system
        .catalog
        .create_product(ProductCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
        })
        .await
        .expect("Failed to create product")
}

async fn orders_stored(system: &OrderSystem) -> usize {
    system
        .memory_store()
        .expect("in-memory system")
        .count_orders()
        .await
        .expect("Failed to count orders")
}

/// Full end-to-end run with every real actor.
#[tokio::test]
async fn test_full_order_round_trip() {
    let system = OrderSystem::new();

    let account_id = system
        .accounts
        .create_account("Alice")
        .await
        .expect("Failed to create account");
    let widget = add_product(&system, "Widget", 25.5).await;
    let gizmo = add_product(&system, "Gizmo", 4.0).await;

    let created = system
        .orders
        .create_order_with_timeout(
            &account_id,
            &[RequestedItem::new(&widget, 2), RequestedItem::new(&gizmo, 3)],
        )
        .await
        .expect("Failed to create order");
    assert_eq!(created.total_price, 63.0);
    assert_eq!(created.lines[0].name, "Widget");

    let history = system
        .orders
        .get_order_history_with_timeout(&account_id)
        .await
        .expect("Failed to read history");
    assert_eq!(history.len(), 1);
    let read = &history[0];
    assert_eq!(read.id, created.id);
    assert_eq!(read.created_at, created.created_at);
    assert_eq!(read.total_price, created.total_price);
    let pairs = |lines: &[order_aggregator::model::OrderedProduct]| -> BTreeSet<(String, u32)> {
        lines
            .iter()
            .map(|l| (l.product_id.clone(), l.quantity))
            .collect()
    };
    assert_eq!(pairs(&read.lines), pairs(&created.lines));

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_unknown_products_are_dropped_from_the_order() {
    let system = OrderSystem::new();
    let account_id = system.accounts.create_account("Bob").await.unwrap();
    let apple = add_product(&system, "Apple", 1.25).await;

    let order = system
        .orders
        .create_order_with_timeout(
            &account_id,
            &[
                RequestedItem::new(&apple, 2),
                RequestedItem::new("not-in-catalog", 1),
            ],
        )
        .await
        .unwrap();

    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.lines[0].product_id, apple);
    assert_eq!(order.total_price, 2.5);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_requests_leave_no_order_behind() {
    let system = OrderSystem::new();
    let account_id = system.accounts.create_account("Carol").await.unwrap();
    let apple = add_product(&system, "Apple", 1.0).await;

    let result = system
        .orders
        .create_order_with_timeout(
            &account_id,
            &[RequestedItem::new(&apple, 2), RequestedItem::new(&apple, 0)],
        )
        .await;
    assert!(matches!(result, Err(OrderError::InvalidArgument(_))));

    let result = system
        .orders
        .create_order_with_timeout("no-such-account", &[RequestedItem::new(&apple, 1)])
        .await;
    assert!(matches!(result, Err(OrderError::AccountNotFound(_))));

    assert_eq!(orders_stored(&system).await, 0);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_history_keeps_frozen_total_and_refreshes_metadata() {
    let system = OrderSystem::new();
    let account_id = system.accounts.create_account("Dana").await.unwrap();
    let lamp = add_product(&system, "Lamp", 30.0).await;
    let bulb = add_product(&system, "Bulb", 2.0).await;

    system
        .orders
        .create_order_with_timeout(
            &account_id,
            &[RequestedItem::new(&lamp, 1), RequestedItem::new(&bulb, 5)],
        )
        .await
        .unwrap();

    system
        .catalog
        .update_product(
            &lamp,
            ProductUpdate {
                name: Some("Brass lamp".to_string()),
                price: Some(45.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let deadline = Instant::now() + Duration::from_secs(1);
    system.catalog.remove_product(&bulb, deadline).await.unwrap();

    let history = system
        .orders
        .get_order_history_with_timeout(&account_id)
        .await
        .unwrap();
    let order = &history[0];
    assert_eq!(order.total_price, 40.0, "total is the creation-time snapshot");

    let lamp_line = order.lines.iter().find(|l| l.product_id == lamp).unwrap();
    assert_eq!(lamp_line.name, "Brass lamp");
    assert_eq!(lamp_line.unit_price, 45.0);

    // Removed from the catalog: only what was persisted survives.
    let bulb_line = order.lines.iter().find(|l| l.product_id == bulb).unwrap();
    assert_eq!(bulb_line.quantity, 5);
    assert!(bulb_line.name.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_account_without_orders_has_empty_history() {
    let system = OrderSystem::new();
    let account_id = system.accounts.create_account("Erin").await.unwrap();

    let history = system
        .orders
        .get_order_history_with_timeout(&account_id)
        .await
        .unwrap();

    assert!(history.is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_orders_are_all_kept_in_id_order() {
    let system = OrderSystem::new();
    let account_id = system.accounts.create_account("Frank").await.unwrap();
    let other_account = system.accounts.create_account("Grace").await.unwrap();
    let pen = add_product(&system, "Pen", 1.5).await;

    let mut tasks = Vec::new();
    for n in 1..=10 {
        let orders = system.orders.clone();
        let account = if n % 2 == 0 {
            account_id.clone()
        } else {
            other_account.clone()
        };
        let item = RequestedItem::new(&pen, n);
        tasks.push(tokio::spawn(async move {
            orders.create_order_with_timeout(&account, &[item]).await
        }));
    }
    for task in tasks {
        task.await.unwrap().expect("concurrent order failed");
    }

    let history = system
        .orders
        .get_order_history_with_timeout(&account_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 5);
    assert!(history.windows(2).all(|w| w[0].id < w[1].id));
    assert!(history.iter().all(|o| o.account_id == account_id));
    assert_eq!(orders_stored(&system).await, 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_account_admin_calls() {
    let system = OrderSystem::new();
    let first = system.accounts.create_account("Hana").await.unwrap();
    let second = system.accounts.create_account("Ivan").await.unwrap();
    let deadline = Instant::now() + Duration::from_secs(1);

    let renamed = system
        .accounts
        .rename_account(&first, "Hana K.")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Hana K.");

    let page = system
        .accounts
        .list_accounts(Page::new(0, 0), deadline)
        .await
        .unwrap();
    let ids: Vec<&str> = page.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);

    let rest = system
        .accounts
        .list_accounts(Page::new(1, 10), deadline)
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].name, "Ivan");

    let result = system.accounts.create_account("   ").await;
    assert!(matches!(result, Err(AccountError::ValidationError(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_search_and_listing() {
    let system = OrderSystem::new();
    let lamp = add_product(&system, "Desk Lamp", 30.0).await;
    add_product(&system, "Chair", 80.0).await;
    let deadline = Instant::now() + Duration::from_secs(1);

    let hits = system
        .catalog
        .query_products(Vec::new(), "lamp", Page::default(), deadline)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, lamp);

    let all = system
        .catalog
        .query_products(Vec::new(), "", Page::default(), deadline)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let by_id = system
        .catalog
        .get_products(&[lamp.clone(), "missing".to_string()], deadline)
        .await
        .unwrap();
    assert_eq!(by_id.len(), 1);

    system.shutdown().await.unwrap();
}
