//! # Account Client
//!
//! The Account Lookup Client used by the order service, plus the admin calls the
//! account service exposes.

use crate::account_actor::{AccountError, AccountQuery};
use crate::clients::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Account, AccountCreate, AccountUpdate, Page};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => AccountError::NotFound(id),
            FrameworkError::EntityError(source) => match source.downcast::<AccountError>() {
                Ok(err) => *err,
                Err(other) => AccountError::ActorCommunicationError(other.to_string()),
            },
            other => AccountError::ActorCommunicationError(other.to_string()),
        }
    }

    fn timed_out(step: &'static str) -> Self::Error {
        AccountError::Timeout(step)
    }
}

impl AccountClient {
    #[instrument(skip(self))]
    pub async fn create_account(&self, name: &str) -> Result<String, AccountError> {
        debug!("Sending request");
        let params = AccountCreate {
            name: name.to_string(),
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// `GetAccount`: the account, or [`AccountError::NotFound`].
    #[instrument(skip(self))]
    pub async fn get_account(&self, id: &str, deadline: Instant) -> Result<Account, AccountError> {
        self.get(id.to_string(), deadline)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_accounts(
        &self,
        page: Page,
        deadline: Instant,
    ) -> Result<Vec<Account>, AccountError> {
        self.query(AccountQuery::List(page), deadline).await
    }

    #[instrument(skip(self))]
    pub async fn rename_account(&self, id: &str, name: &str) -> Result<Account, AccountError> {
        debug!("Sending request");
        let update = AccountUpdate {
            name: Some(name.to_string()),
        };
        self.inner
            .update(id.to_string(), update)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_get, MockClient};
    use std::time::Duration;

    fn soon() -> Instant {
        Instant::now() + Duration::from_secs(1)
    }

    #[tokio::test]
    async fn test_missing_account_is_not_found() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_get("acc_9".to_string()).return_ok(None);

        let client = AccountClient::new(mock.client());
        let result = client.get_account("acc_9", soon()).await;

        assert_eq!(result, Err(AccountError::NotFound("acc_9".to_string())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_error_keeps_its_kind() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                AccountError::ValidationError("blank".into()),
            )));

        let client = AccountClient::new(mock.client());
        let result = client.create_account(" ").await;

        assert_eq!(result, Err(AccountError::ValidationError("blank".into())));
    }

    #[tokio::test]
    async fn test_rename_account_maps_update_results() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_update("acc_1".to_string())
            .return_ok(Account::new("acc_1", "Alicia"));
        mock.expect_update("acc_9".to_string())
            .return_err(FrameworkError::NotFound("acc_9".to_string()));

        let client = AccountClient::new(mock.client());

        let renamed = client.rename_account("acc_1", "Alicia").await.unwrap();
        assert_eq!(renamed.name, "Alicia");
        let result = client.rename_account("acc_9", "Nobody").await;
        assert_eq!(result, Err(AccountError::NotFound("acc_9".to_string())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_deadline_expires_while_actor_is_silent() {
        let (inner, mut receiver) = create_mock_client::<Account>(10);
        let client = AccountClient::new(inner);

        let lookup = tokio::spawn(async move {
            client
                .get_account("acc_1", Instant::now() + Duration::from_millis(50))
                .await
        });

        // Hold the responder without answering until the caller gives up.
        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "acc_1");
        let result = lookup.await.unwrap();
        drop(responder);

        assert_eq!(result, Err(AccountError::Timeout("get")));
    }
}
