use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthenticatedSession;
use crate::account::models::Credentials;
use crate::account::models::Identity;
use crate::account::models::SigninCommand;
use crate::account::models::SignupCommand;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated email, password and names
    ///
    /// # Returns
    /// Created account with an access token
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `CryptoFailure` - Hashing or signing failed
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<AuthenticatedSession, AccountError>;

    /// Check email and password and issue a fresh token.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `CryptoFailure` - Hashing or signing failed
    /// * `DatabaseError` - Database operation failed
    async fn signin(&self, command: SigninCommand) -> Result<AuthenticatedSession, AccountError>;

    /// Validate an access token without touching the store.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is expired, forged or malformed
    fn authorize(&self, token: &str) -> Result<Identity, AccountError>;

    /// Resolve presented credentials to an identity.
    ///
    /// # Errors
    /// Same as `signin` for passwords and `authorize` for bearer tokens
    async fn validate(&self, credentials: Credentials) -> Result<Identity, AccountError>;

    /// Load the account behind an authenticated identity.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn profile(&self, identity: &Identity) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Implementations must enforce email uniqueness atomically on insert: two
/// concurrent inserts with the same email yield exactly one stored record.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by email address (exact match).
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
}
