//! Account service: keyed account records behind a [`ResourceActor`].

pub mod entity;
pub mod error;
mod query;

pub use error::*;
pub use query::*;

use crate::clients::AccountClient;
use crate::framework::ResourceActor;
use crate::model::Account;
use uuid::Uuid;

/// Creates a new Account actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, AccountClient) {
    let next_account_id = || Uuid::now_v7().to_string();

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_account_id);
    let client = AccountClient::new(generic_client);

    (actor, client)
}
