//! Catalog service: products with bulk-by-id, free-text and paged reads.

pub mod entity;
pub mod error;
mod query;

pub use error::*;
pub use query::*;

use crate::clients::CatalogClient;
use crate::framework::ResourceActor;
use crate::model::Product;
use uuid::Uuid;

/// Creates a new Catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, CatalogClient) {
    let next_product_id = || Uuid::now_v7().to_string();

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_product_id);
    let client = CatalogClient::new(generic_client);

    (actor, client)
}
