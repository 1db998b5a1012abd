use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<AccountId, Account>,
    /// email -> account id
    by_email: HashMap<String, AccountId>,
}

/// Process-local account store.
///
/// Used when no database is configured and in tests. The email check and the
/// insert happen under one write lock, so uniqueness holds under concurrency
/// within a single process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.by_email.contains_key(account.email.as_str()) {
            return Err(AccountError::AlreadyExists(account.email.to_string()));
        }

        accounts
            .by_email
            .insert(account.email.as_str().to_string(), account.id);
        accounts.by_id.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;

        Ok(accounts
            .by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.by_id.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use chrono::Utc;

    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::PersonName;

    fn account(email: &str, first_name: &str) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash("pw123").unwrap(),
            first_name: PersonName::new(first_name.to_string()).unwrap(),
            last_name: PersonName::new("B".to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repository = InMemoryAccountRepository::new();
        let stored = repository.insert(account("a@x.com", "A")).await.unwrap();

        let by_email = repository.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, stored.id);

        let by_id = repository.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(by_id.email.as_str(), "a@x.com");

        assert!(repository.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(repository
            .find_by_id(&AccountId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_keeps_original() {
        let repository = InMemoryAccountRepository::new();
        let original = repository.insert(account("a@x.com", "A")).await.unwrap();

        let result = repository.insert(account("a@x.com", "Other")).await;
        assert!(matches!(result, Err(AccountError::AlreadyExists(_))));

        let stored = repository.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.first_name.as_str(), "A");
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_store_one_record() {
        let repository = InMemoryAccountRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = repository.clone();
                let candidate = account("race@x.com", "A");
                tokio::spawn(async move { repository.insert(candidate).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(matches!(e, AccountError::AlreadyExists(_))),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }
}
