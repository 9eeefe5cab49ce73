//! Order service against mocked account and catalog services and a real in-memory
//! store.

use order_aggregator::clients::{AccountClient, CatalogClient};
use order_aggregator::framework::mock::{create_mock_client, MockClient};
use order_aggregator::framework::FrameworkError;
use order_aggregator::model::{Account, Product, RequestedItem};
use order_aggregator::orders::{OrderError, OrderService};
use order_aggregator::store::{MemoryOrderStore, OrderLedger, OrderStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

struct Harness {
    accounts: MockClient<Account>,
    catalog: MockClient<Product>,
    store: MemoryOrderStore,
    service: OrderService,
}

fn spawn_store() -> MemoryOrderStore {
    let (ledger, store) = OrderLedger::new(8);
    tokio::spawn(ledger.run());
    store
}

fn harness() -> Harness {
    let accounts = MockClient::<Account>::new();
    let catalog = MockClient::<Product>::new();
    let store = spawn_store();
    let service = OrderService::new(
        AccountClient::new(accounts.client()),
        CatalogClient::new(catalog.client()),
        Arc::new(store.clone()),
        Duration::from_secs(1),
    );
    Harness {
        accounts,
        catalog,
        store,
        service,
    }
}

fn alice() -> Account {
    Account::new("acc_1", "Alice")
}

fn soon() -> Instant {
    Instant::now() + Duration::from_secs(1)
}

#[tokio::test]
async fn test_create_order_prices_matched_items_and_persists() {
    let mut h = harness();
    h.accounts
        .expect_get("acc_1".to_string())
        .return_ok(Some(alice()));
    h.catalog.expect_query().return_ok(vec![
        Product::new("a", "Apple", "Red", 2.0),
        Product::new("b", "Bread", "Rye", 3.5),
    ]);

    let items = [
        RequestedItem::new("a", 2),
        RequestedItem::new("b", 1),
        RequestedItem::new("unknown", 1),
    ];
    let order = h
        .service
        .create_order("acc_1", &items, soon())
        .await
        .expect("order should be created");

    assert_eq!(order.account_id, "acc_1");
    assert_eq!(order.total_price, 7.5);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.lines[0].name, "Apple");
    assert_eq!(h.catalog.request_count(), 1, "one bulk lookup");
    assert_eq!(h.store.count_orders().await.unwrap(), 1);
    h.accounts.verify();
    h.catalog.verify();
}

#[tokio::test]
async fn test_non_positive_quantity_fails_before_any_call() {
    let h = harness();

    for quantity in [0, -3] {
        let items = [RequestedItem::new("a", 1), RequestedItem::new("b", quantity)];
        let result = h.service.create_order("acc_1", &items, soon()).await;
        assert!(matches!(result, Err(OrderError::InvalidArgument(_))));
    }

    assert_eq!(h.accounts.request_count(), 0);
    assert_eq!(h.catalog.request_count(), 0);
    assert_eq!(h.store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_account_or_items_are_invalid() {
    let h = harness();

    let result = h
        .service
        .create_order("  ", &[RequestedItem::new("a", 1)], soon())
        .await;
    assert!(matches!(result, Err(OrderError::InvalidArgument(_))));

    let result = h.service.create_order("acc_1", &[], soon()).await;
    assert!(matches!(result, Err(OrderError::InvalidArgument(_))));

    let result = h.service.get_order_history("", soon()).await;
    assert!(matches!(result, Err(OrderError::InvalidArgument(_))));

    assert_eq!(h.accounts.request_count(), 0);
}

#[tokio::test]
async fn test_missing_account_stops_before_catalog_and_store() {
    let mut h = harness();
    h.accounts.expect_get("acc_9".to_string()).return_ok(None);

    let result = h
        .service
        .create_order("acc_9", &[RequestedItem::new("a", 1)], soon())
        .await;

    assert_eq!(result, Err(OrderError::AccountNotFound("acc_9".to_string())));
    assert_eq!(h.catalog.request_count(), 0);
    assert_eq!(h.store.count_orders().await.unwrap(), 0);
    h.accounts.verify();
}

#[tokio::test]
async fn test_unreachable_account_service_is_distinct_from_missing_account() {
    let mut h = harness();
    h.accounts
        .expect_get("acc_1".to_string())
        .return_err(FrameworkError::ActorClosed);

    let result = h
        .service
        .create_order("acc_1", &[RequestedItem::new("a", 1)], soon())
        .await;

    assert!(matches!(result, Err(OrderError::AccountUnavailable(_))));
    assert_eq!(h.catalog.request_count(), 0);
}

#[tokio::test]
async fn test_catalog_failure_writes_nothing() {
    let mut h = harness();
    h.accounts
        .expect_get("acc_1".to_string())
        .return_ok(Some(alice()));
    h.catalog
        .expect_query()
        .return_err(FrameworkError::ActorDropped);

    let result = h
        .service
        .create_order("acc_1", &[RequestedItem::new("a", 1)], soon())
        .await;

    assert!(matches!(result, Err(OrderError::ProductsNotFound(_))));
    assert_eq!(h.store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn test_no_matching_product_is_invalid_and_writes_nothing() {
    let mut h = harness();
    h.accounts
        .expect_get("acc_1".to_string())
        .return_ok(Some(alice()));
    h.catalog.expect_query().return_ok(Vec::new());

    let result = h
        .service
        .create_order("acc_1", &[RequestedItem::new("ghost", 1)], soon())
        .await;

    assert!(matches!(result, Err(OrderError::InvalidArgument(_))));
    assert_eq!(h.store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn test_slow_account_service_times_out() {
    // Requests reach the receiver but are never answered.
    let (inner, _pending) = create_mock_client::<Account>(4);
    let catalog = MockClient::<Product>::new();
    let store = spawn_store();
    let service = OrderService::new(
        AccountClient::new(inner),
        CatalogClient::new(catalog.client()),
        Arc::new(store.clone()),
        Duration::from_secs(1),
    );

    let deadline = Instant::now() + Duration::from_millis(30);
    let result = service
        .create_order("acc_1", &[RequestedItem::new("a", 1)], deadline)
        .await;

    assert_eq!(result, Err(OrderError::Timeout("account_lookup")));
    assert_eq!(catalog.request_count(), 0);
    assert_eq!(store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn test_closed_store_is_unavailable() {
    let mut accounts = MockClient::<Account>::new();
    let mut catalog = MockClient::<Product>::new();
    accounts
        .expect_get("acc_1".to_string())
        .return_ok(Some(alice()));
    catalog
        .expect_query()
        .return_ok(vec![Product::new("a", "Apple", "Red", 2.0)]);
    let (ledger, store) = OrderLedger::new(1);
    drop(ledger);
    let service = OrderService::new(
        AccountClient::new(accounts.client()),
        CatalogClient::new(catalog.client()),
        Arc::new(store),
        Duration::from_secs(1),
    );

    let result = service
        .create_order("acc_1", &[RequestedItem::new("a", 1)], soon())
        .await;

    assert!(matches!(result, Err(OrderError::OrderStoreUnavailable(_))));
}

#[tokio::test]
async fn test_empty_history_skips_the_catalog() {
    let h = harness();

    let history = h.service.get_order_history("acc_1", soon()).await.unwrap();

    assert!(history.is_empty());
    assert_eq!(h.catalog.request_count(), 0);
    assert_eq!(h.accounts.request_count(), 0);
}

#[tokio::test]
async fn test_history_refreshes_metadata_in_one_lookup() {
    let mut h = harness();
    h.accounts
        .expect_get("acc_1".to_string())
        .return_ok(Some(alice()));
    h.catalog.expect_query().return_ok(vec![
        Product::new("a", "Apple", "Red", 2.0),
        Product::new("b", "Bread", "Rye", 3.5),
    ]);
    let created = h
        .service
        .create_order(
            "acc_1",
            &[RequestedItem::new("a", 2), RequestedItem::new("b", 1)],
            soon(),
        )
        .await
        .unwrap();

    h.catalog.expect_query().return_ok(vec![
        Product::new("a", "Green apple", "Granny Smith", 9.0),
        Product::new("b", "Bread", "Rye", 3.5),
    ]);
    let history = h.service.get_order_history("acc_1", soon()).await.unwrap();

    assert_eq!(history.len(), 1);
    let order = &history[0];
    assert_eq!(order.id, created.id);
    assert_eq!(order.total_price, 7.5);
    let apple = order
        .lines
        .iter()
        .find(|l| l.product_id == "a")
        .expect("apple line");
    assert_eq!(apple.name, "Green apple");
    assert_eq!(apple.unit_price, 9.0);
    assert_eq!(apple.quantity, 2);
    assert_eq!(h.catalog.request_count(), 2);
    h.catalog.verify();
}

#[tokio::test]
async fn test_history_catalog_failure_is_products_not_found() {
    let mut h = harness();
    let order = order_aggregator::model::Order::place(
        "acc_1",
        vec![order_aggregator::model::OrderedProduct::unpriced("a", 1)],
    );
    h.store.put(&order, soon()).await.unwrap();
    h.catalog
        .expect_query()
        .return_err(FrameworkError::ActorClosed);

    let result = h.service.get_order_history("acc_1", soon()).await;

    assert!(matches!(result, Err(OrderError::ProductsNotFound(_))));
}
