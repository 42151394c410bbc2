use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;

/// In-memory account repository.
///
/// Enforces the same email uniqueness contract as the Postgres
/// implementation. Used by the HTTP integration tests so the full
/// router/middleware stack runs without a database.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.id.0, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id.0) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        accounts.insert(account.id.0, account.clone());
        Ok(account)
    }
}
