//! [`ActorEntity`] implementation for [`Account`].

use super::{AccountError, AccountQuery};
use crate::framework::ActorEntity;
use crate::model::{Account, AccountCreate, AccountUpdate};

fn validated_name(name: String) -> Result<String, AccountError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AccountError::ValidationError(
            "account name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

impl ActorEntity for Account {
    type Id = String;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Query = AccountQuery;
    type Error = AccountError;

    fn from_create_params(id: String, params: AccountCreate) -> Result<Self, AccountError> {
        Ok(Self::new(id, validated_name(params.name)?))
    }

    fn on_update(&mut self, update: AccountUpdate) -> Result<(), AccountError> {
        if let Some(name) = update.name {
            self.name = validated_name(name)?;
        }
        Ok(())
    }

    fn matches(&self, query: &AccountQuery) -> bool {
        match query {
            AccountQuery::List(_) => true,
        }
    }

    fn window(query: &AccountQuery) -> (usize, Option<usize>) {
        match query {
            AccountQuery::List(page) => page.window(),
        }
    }
}
