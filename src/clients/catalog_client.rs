//! # Catalog Client
//!
//! The Catalog Lookup Client used by the order service, plus the admin calls the
//! catalog service exposes.

use crate::catalog_actor::{CatalogError, CatalogQuery};
use crate::clients::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Page, Product, ProductCreate, ProductUpdate};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Client for interacting with the Catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::EntityError(source) => match source.downcast::<CatalogError>() {
                Ok(err) => *err,
                Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
            },
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }

    fn timed_out(step: &'static str) -> Self::Error {
        CatalogError::Timeout(step)
    }
}

impl CatalogClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner
            .update(id.to_string(), update)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: &str, deadline: Instant) -> Result<(), CatalogError> {
        self.delete(id.to_string(), deadline).await
    }

    /// Bulk lookup by id in a single request.
    ///
    /// Products that do not exist are simply missing from the result. An empty id
    /// list short-circuits without contacting the catalog.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn get_products(
        &self,
        ids: &[String],
        deadline: Instant,
    ) -> Result<Vec<Product>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query(CatalogQuery::by_ids(ids.iter().cloned()), deadline)
            .await
    }

    /// `GetProducts(ids | query, skip, take)`: free text wins over ids, and with
    /// neither every product is listed.
    #[instrument(skip(self))]
    pub async fn query_products(
        &self,
        ids: Vec<String>,
        text: &str,
        page: Page,
        deadline: Instant,
    ) -> Result<Vec<Product>, CatalogError> {
        self.query(CatalogQuery::from_parts(ids, text, page), deadline)
            .await
    }
}
