//! # ActorClient Trait
//!
//! Common, deadline-aware reads for the resource-specific clients, built on top of a
//! generic [`ResourceClient`].

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tokio::time::{timeout_at, Instant};

/// Trait for resource-specific clients to inherit the standard reads.
///
/// Every call takes the caller's deadline. When it passes first, the call
/// returns [`ActorClient::timed_out`] and the pending response is dropped.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// The error reported when `step` outlives the caller's deadline.
    fn timed_out(step: &'static str) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id, deadline: Instant) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        match timeout_at(deadline, self.inner().get(id)).await {
            Ok(result) => result.map_err(Self::map_error),
            Err(_) => Err(Self::timed_out("get")),
        }
    }

    /// Run a collection query.
    #[tracing::instrument(skip(self))]
    async fn query(&self, query: T::Query, deadline: Instant) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        match timeout_at(deadline, self.inner().query(query)).await {
            Ok(result) => result.map_err(Self::map_error),
            Err(_) => Err(Self::timed_out("query")),
        }
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id, deadline: Instant) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        match timeout_at(deadline, self.inner().delete(id)).await {
            Ok(result) => result.map_err(Self::map_error),
            Err(_) => Err(Self::timed_out("delete")),
        }
    }
}
