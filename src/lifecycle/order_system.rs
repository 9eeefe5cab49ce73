use crate::clients::{AccountClient, CatalogClient};
use crate::config::OrderServiceConfig;
use crate::orders::OrderService;
use crate::store::{MemoryOrderStore, OrderLedger, OrderStore, PgOrderStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

enum Backend {
    Memory(MemoryOrderStore),
    Postgres(PgOrderStore),
}

/// Starts the account and catalog services and the order store, and builds the
/// [`OrderService`] on top of them.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let account_id = system.accounts.create_account("Alice").await?;
/// let order = system
///     .orders
///     .create_order_with_timeout(&account_id, &[RequestedItem::new(product_id, 2)])
///     .await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub accounts: AccountClient,
    pub catalog: CatalogClient,
    pub orders: OrderService,
    backend: Backend,
    handles: Vec<JoinHandle<()>>,
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSystem {
    /// In-memory system with default settings. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::in_memory(&OrderServiceConfig::default())
    }

    pub fn in_memory(config: &OrderServiceConfig) -> Self {
        let (ledger, store) = OrderLedger::new(config.channel_buffer);
        let ledger_handle = tokio::spawn(ledger.run());
        let mut system = Self::assemble(
            config,
            Arc::new(store.clone()),
            Backend::Memory(store),
        );
        system.handles.push(ledger_handle);
        system
    }

    /// Uses Postgres when `database_url` is set, the in-memory store otherwise.
    pub async fn from_config(config: &OrderServiceConfig) -> Result<Self, StoreError> {
        match &config.database_url {
            Some(url) => {
                let store = PgOrderStore::connect(url, config.db_max_connections).await?;
                Ok(Self::assemble(
                    config,
                    Arc::new(store.clone()),
                    Backend::Postgres(store),
                ))
            }
            None => Ok(Self::in_memory(config)),
        }
    }

    fn assemble(config: &OrderServiceConfig, store: Arc<dyn OrderStore>, backend: Backend) -> Self {
        let (account_actor, accounts) = crate::account_actor::new(config.channel_buffer);
        let (catalog_actor, catalog) = crate::catalog_actor::new(config.channel_buffer);

        let handles = vec![
            tokio::spawn(account_actor.run()),
            tokio::spawn(catalog_actor.run()),
        ];

        let orders = OrderService::new(
            accounts.clone(),
            catalog.clone(),
            store,
            config.request_timeout,
        );
        info!(
            persistent = matches!(backend, Backend::Postgres(_)),
            "Order system started"
        );

        Self {
            accounts,
            catalog,
            orders,
            backend,
            handles,
        }
    }

    /// The in-memory store, when the system runs on one.
    pub fn memory_store(&self) -> Option<&MemoryOrderStore> {
        match &self.backend {
            Backend::Memory(store) => Some(store),
            Backend::Postgres(_) => None,
        }
    }

    /// Drops every handle this system owns and waits for the actors to drain.
    ///
    /// Clones of the clients or of the [`OrderService`] held elsewhere keep their
    /// actors alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.accounts);
        drop(self.catalog);
        match self.backend {
            Backend::Memory(store) => drop(store),
            Backend::Postgres(store) => store.close().await,
        }

        join_all(self.handles).await?;

        info!("System shutdown complete.");
        Ok(())
    }
}

/// Awaits every handle, even after one fails, and returns the first failure.
async fn join_all(handles: Vec<JoinHandle<()>>) -> Result<(), ShutdownError> {
    let mut first_error = None;
    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Actor task failed");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
