use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::SignupCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated signup fields plus the plaintext secret
    ///
    /// # Returns
    /// Created account and the issued access/refresh tokens
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` / `Token` - Crypto infrastructure failed
    /// * `StorageTimeout` / `DatabaseError` - Storage operation failed
    async fn signup(&self, command: SignupCommand) -> Result<(Account, TokenPair), AccountError>;

    /// Authenticate an account by email and secret, issuing fresh tokens.
    ///
    /// # Arguments
    /// * `email` - Login email
    /// * `secret` - Plaintext secret to verify
    ///
    /// # Returns
    /// Matching account and a freshly issued token pair
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `InvalidCredentials` - Secret does not match
    /// * `Token` - Token issuance failed
    /// * `StorageTimeout` / `DatabaseError` - Storage operation failed
    async fn login(&self, email: &str, secret: &str) -> Result<(Account, TokenPair), AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StorageTimeout` / `DatabaseError` - Storage operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve all accounts.
    ///
    /// # Errors
    /// * `StorageTimeout` / `DatabaseError` - Storage operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// The storage layer is the authoritative guard against duplicate
/// emails: `create` must surface a unique-constraint violation as
/// `EmailAlreadyExists` so concurrent signups racing on the same email
/// resolve with at most one winner.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by email.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Update an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}
