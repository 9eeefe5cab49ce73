//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod account_client;
pub mod actor_client;
pub mod catalog_client;

pub use account_client::*;
pub use actor_client::ActorClient;
pub use catalog_client::*;
