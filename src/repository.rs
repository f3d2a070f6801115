use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::client::ClientError;
use crate::models::{Account, Client};
use crate::store::{DocumentStore, StoreError};

const MAX_REPLACE_ATTEMPTS: usize = 3;

/// Client- and account-level operations built entirely from document-store
/// point operations. The store offers no partial update of nested
/// structures, so every account mutation is a read-modify-replace cycle
/// conditioned on the revision it read, retried a few times on conflict.
#[derive(Clone)]
pub struct ClientRepository {
    store: Arc<dyn DocumentStore>,
}

impl ClientRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert a client, generating an id when the caller supplied an empty
    /// one. Returns the stored document.
    pub async fn create_client(&self, client: Client) -> Result<Client, ClientError> {
        Ok(self.store.put(client).await?)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get_client(&self, client_id: &str) -> Result<Client, ClientError> {
        Ok(self.store.get(client_id).await?)
    }

    /// Append an account to the client's sequence and return the updated
    /// client. Duplicate names are not rejected; lookups take the first
    /// match.
    pub async fn create_account(
        &self,
        client_id: &str,
        account: Account,
    ) -> Result<Client, ClientError> {
        self.mutate_document(client_id, move |client| {
            client.accounts.push(account.clone());
            Ok(())
        })
        .await?;

        Ok(self.store.get(client_id).await?)
    }

    pub async fn list_accounts(&self, client_id: &str) -> Result<Vec<Account>, ClientError> {
        Ok(self.store.get(client_id).await?.accounts)
    }

    /// Accounts whose balance satisfies the given bound(s). Both bounds are
    /// exclusive; with no bound at all every account is returned.
    pub async fn query_accounts(
        &self,
        client_id: &str,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Result<Vec<Account>, ClientError> {
        let accounts = self.list_accounts(client_id).await?;
        Ok(accounts
            .into_iter()
            .filter(|account| match (min, max) {
                (Some(min), Some(max)) => min < account.balance && account.balance < max,
                (Some(min), None) => min < account.balance,
                (None, Some(max)) => account.balance < max,
                (None, None) => true,
            })
            .collect())
    }

    /// First account in the sequence with the given name.
    pub async fn get_account_by_name(
        &self,
        client_id: &str,
        name: &str,
    ) -> Result<Account, ClientError> {
        self.list_accounts(client_id)
            .await?
            .into_iter()
            .find(|account| account.account_name == name)
            .ok_or_else(|| ClientError::account_not_found(name))
    }

    /// Whole-document replace with caller-supplied data. No diffing: fields
    /// the caller omitted are gone afterwards. The path id wins over
    /// whatever id the body carried, the partition key never moves.
    pub async fn update_client(
        &self,
        client_id: &str,
        new_client: Client,
    ) -> Result<Client, ClientError> {
        self.mutate_document(client_id, move |client| {
            *client = Client {
                id: client_id.to_string(),
                ..new_client.clone()
            };
            Ok(())
        })
        .await?;

        Ok(self.store.get(client_id).await?)
    }

    pub async fn deposit_into_account(
        &self,
        client_id: &str,
        name: &str,
        amount: Decimal,
    ) -> Result<Account, ClientError> {
        self.adjust_balance(client_id, name, amount).await
    }

    pub async fn withdraw_from_account(
        &self,
        client_id: &str,
        name: &str,
        amount: Decimal,
    ) -> Result<Account, ClientError> {
        self.adjust_balance(client_id, name, -amount).await
    }

    pub async fn delete_client(&self, client_id: &str) -> Result<(), ClientError> {
        Ok(self.store.delete(client_id).await?)
    }

    /// Locate the first account with the given name, shift its balance by
    /// `delta`, replace the whole document, then re-read and return just the
    /// mutated account. Amount validation belongs to the HTTP boundary; the
    /// arithmetic here is unchecked.
    async fn adjust_balance(
        &self,
        client_id: &str,
        name: &str,
        delta: Decimal,
    ) -> Result<Account, ClientError> {
        self.mutate_document(client_id, move |client| {
            let account = client
                .accounts
                .iter_mut()
                .find(|account| account.account_name == name)
                .ok_or_else(|| ClientError::account_not_found(name))?;
            account.balance += delta;
            Ok(())
        })
        .await?;

        self.get_account_by_name(client_id, name).await
    }

    /// Optimistic read-modify-replace loop. Two writers racing on the same
    /// client would otherwise silently lose one update; the revision check
    /// turns that into a conflict we retry, and give up on after a few
    /// rounds.
    async fn mutate_document<F>(&self, client_id: &str, mutate: F) -> Result<(), ClientError>
    where
        F: Fn(&mut Client) -> Result<(), ClientError> + Send,
    {
        for attempt in 1..=MAX_REPLACE_ATTEMPTS {
            let versioned = self.store.get_versioned(client_id).await?;
            let mut client = versioned.client;
            mutate(&mut client)?;

            match self
                .store
                .replace(client_id, &client, versioned.revision)
                .await
            {
                Ok(()) => return Ok(()),
                Err(StoreError::Conflict(_)) if attempt < MAX_REPLACE_ATTEMPTS => {
                    warn!(
                        "revision conflict on client '{}', attempt {} of {}",
                        client_id, attempt, MAX_REPLACE_ATTEMPTS
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ClientError::replace_conflict(client_id))
    }
}
