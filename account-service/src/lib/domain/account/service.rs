use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::SignupCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Composes the secret hasher and token issuer (via the injected
/// `Authenticator`) with the storage collaborator. Every storage call is
/// bounded by a deadline so a slow backend cannot stall the gate.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
    storage_deadline: Duration,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Secret hashing and token issuance/verification
    /// * `storage_deadline` - Upper bound on any single storage call
    pub fn new(
        repository: Arc<R>,
        authenticator: Arc<Authenticator>,
        storage_deadline: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            storage_deadline,
        }
    }

    /// Run a storage operation under the configured deadline.
    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> Result<T, AccountError>
    where
        F: Future<Output = Result<T, AccountError>> + Send,
    {
        tokio::time::timeout(self.storage_deadline, future)
            .await
            .map_err(|_| AccountError::StorageTimeout(operation.to_string()))?
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<(Account, TokenPair), AccountError> {
        // Pre-check for a friendlier conflict response. Not atomic against
        // concurrent signups; the unique constraint enforced by `create`
        // is the authoritative guard.
        let existing = self
            .bounded(
                "find account by email",
                self.repository.find_by_email(command.email.as_str()),
            )
            .await?;
        if existing.is_some() {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let secret_hash = self
            .authenticator
            .hash_secret(command.secret.as_str())
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let id = AccountId::new();
        let tokens = self
            .authenticator
            .issue_tokens(
                &id.to_string(),
                command.email.as_str(),
                command.role.as_str(),
            )
            .map_err(|e| AccountError::Token(e.to_string()))?;

        let now = Utc::now();
        let account = Account {
            id,
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            role: command.role,
            secret_hash,
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
            created_at: now,
            updated_at: now,
        };

        let created = self
            .bounded("create account", self.repository.create(account))
            .await?;

        tracing::info!(account_id = %created.id, role = %created.role, "Account created");

        Ok((created, tokens))
    }

    async fn login(&self, email: &str, secret: &str) -> Result<(Account, TokenPair), AccountError> {
        let account = self
            .bounded(
                "find account by email",
                self.repository.find_by_email(email),
            )
            .await?
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;

        if !self.authenticator.verify_secret(secret, &account.secret_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        let tokens = self
            .authenticator
            .issue_tokens(
                &account.id.to_string(),
                account.email.as_str(),
                account.role.as_str(),
            )
            .map_err(|e| AccountError::Token(e.to_string()))?;

        // Best-effort persistence of the issued pair onto the record.
        // A failure here must not fail the login.
        let mut record = account.clone();
        record.access_token = Some(tokens.access_token.clone());
        record.refresh_token = Some(tokens.refresh_token.clone());
        record.updated_at = Utc::now();
        if let Err(e) = self
            .bounded("persist issued tokens", self.repository.update(record))
            .await
        {
            tracing::warn!(
                account_id = %account.id,
                error = %e,
                "Failed to persist issued tokens, login continues"
            );
        }

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok((account, tokens))
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.bounded("find account by id", self.repository.find_by_id(id))
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.bounded("list accounts", self.repository.list_all())
            .await
    }
}

#[cfg(test)]
mod tests {
    use auth::SigningKey;
    use auth::TokenKind;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::PersonName;
    use crate::domain::account::models::Phone;
    use crate::domain::account::models::Role;
    use crate::domain::account::models::Secret;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
            async fn update(&self, account: Account) -> Result<Account, AccountError>;
        }
    }

    fn test_authenticator() -> Arc<Authenticator> {
        let key = SigningKey::from_bytes(b"test-secret-key-for-jwt-signing-at-least-32-bytes")
            .expect("Failed to construct key");
        Arc::new(Authenticator::new(&key))
    }

    fn test_service(
        repository: MockTestAccountRepository,
    ) -> AccountService<MockTestAccountRepository> {
        AccountService::new(
            Arc::new(repository),
            test_authenticator(),
            Duration::from_secs(5),
        )
    }

    fn signup_command(email: &str) -> SignupCommand {
        SignupCommand::new(
            PersonName::new("Ann".to_string()).unwrap(),
            PersonName::new("Lee".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Phone::new("555-0100".to_string()).unwrap(),
            Role::User,
            Secret::new("longenough1".to_string()).unwrap(),
        )
    }

    fn stored_account(email: &str, secret: &str) -> Account {
        let authenticator = test_authenticator();
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            first_name: PersonName::new("Ann".to_string()).unwrap(),
            last_name: PersonName::new("Lee".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            phone: Phone::new("555-0100".to_string()).unwrap(),
            role: Role::User,
            secret_hash: authenticator.hash_secret(secret).unwrap(),
            access_token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_signup_success_issues_verifiable_tokens() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .with(eq("ann@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "ann@example.com"
                    && account.secret_hash.starts_with("$argon2")
                    && account.access_token.is_some()
                    && account.refresh_token.is_some()
                    && account.created_at == account.updated_at
            })
            .times(1)
            .returning(|account| Ok(account));

        let service = test_service(repository);
        let (account, tokens) = service
            .signup(signup_command("ann@example.com"))
            .await
            .expect("Signup failed");

        assert_eq!(account.role, Role::User);

        let claims = test_authenticator()
            .verify_access_token(&tokens.access_token)
            .expect("Access token did not verify");
        assert_eq!(claims.email, "ann@example.com");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.sub, account.id.to_string());

        let refresh_claims = test_authenticator()
            .verify_token(&tokens.refresh_token)
            .expect("Refresh token did not verify");
        assert_eq!(refresh_claims.kind, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_conflicts_before_create() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_account("ann@example.com", "longenough1"))));
        repository.expect_create().times(0);

        let service = test_service(repository);
        let result = service.signup(signup_command("ann@example.com")).await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_signup_race_surfaces_create_time_conflict() {
        let mut repository = MockTestAccountRepository::new();

        // A concurrent signup won between the pre-check and the insert;
        // the storage unique constraint is the backstop.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(1).returning(|account| {
            Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ))
        });

        let service = test_service(repository);
        let result = service.signup(signup_command("ann@example.com")).await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .with(eq("ann@example.com"))
            .times(1)
            .returning(|_| Ok(Some(stored_account("ann@example.com", "longenough1"))));
        repository
            .expect_update()
            .withf(|account| account.access_token.is_some() && account.refresh_token.is_some())
            .times(1)
            .returning(|account| Ok(account));

        let service = test_service(repository);
        let (account, tokens) = service
            .login("ann@example.com", "longenough1")
            .await
            .expect("Login failed");

        let claims = test_authenticator()
            .verify_access_token(&tokens.access_token)
            .expect("Access token did not verify");
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_secret() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_account("ann@example.com", "longenough1"))));
        repository.expect_update().times(0);

        let service = test_service(repository);
        let result = service.login("ann@example.com", "wrongsecret").await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = test_service(repository);
        let result = service.login("ghost@example.com", "longenough1").await;

        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_login_survives_token_persistence_failure() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_account("ann@example.com", "longenough1"))));
        repository
            .expect_update()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));

        let service = test_service(repository);
        let result = service.login("ann@example.com", "longenough1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = test_service(repository);
        let result = service.get_account(&AccountId::new()).await;

        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    /// Repository that never answers, for deadline tests.
    struct StalledRepository;

    #[async_trait]
    impl AccountRepository for StalledRepository {
        async fn create(&self, _account: Account) -> Result<Account, AccountError> {
            std::future::pending().await
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<Account>, AccountError> {
            std::future::pending().await
        }

        async fn find_by_id(&self, _id: &AccountId) -> Result<Option<Account>, AccountError> {
            std::future::pending().await
        }

        async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
            std::future::pending().await
        }

        async fn update(&self, _account: Account) -> Result<Account, AccountError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_storage_times_out() {
        let service = AccountService::new(
            Arc::new(StalledRepository),
            test_authenticator(),
            Duration::from_millis(50),
        );

        let result = service.login("ann@example.com", "longenough1").await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::StorageTimeout(_)
        ));
    }
}
