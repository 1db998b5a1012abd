use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHash;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthState;
use crate::account::models::AuthenticatedSession;
use crate::account::models::Credentials;
use crate::account::models::Identity;
use crate::account::models::Password;
use crate::account::models::SigninCommand;
use crate::account::models::SignupCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for signup, signin and token checks.
///
/// Email uniqueness is left to the repository; this service never locks.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing, built once at startup
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Run the KDF off the async workers.
    async fn hash_password(&self, password: Password) -> Result<PasswordHash, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| AccountError::CryptoFailure(format!("Hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    async fn verify_password(
        &self,
        password: String,
        stored_hash: PasswordHash,
    ) -> Result<(), AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AccountError::CryptoFailure(format!("Verification task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    /// Look up the account and check its password. No token is issued.
    async fn check_password(
        &self,
        operation: &'static str,
        command: SigninCommand,
    ) -> Result<Account, AccountError> {
        tracing::debug!(operation, state = %AuthState::Received, email = %command.email);

        let account = match self.repository.find_by_email(&command.email).await? {
            Some(account) => account,
            None => {
                return Err(rejected(
                    operation,
                    AccountError::NotFound(command.email),
                ))
            }
        };
        tracing::debug!(operation, state = %AuthState::Validated, account_id = %account.id);

        self.verify_password(command.password, account.password_hash.clone())
            .await
            .map_err(|e| match e {
                AccountError::InvalidCredentials => rejected(operation, e),
                other => other,
            })?;

        Ok(account)
    }

    fn issue_session(&self, account: Account) -> Result<AuthenticatedSession, AccountError> {
        let access_token = self
            .authenticator
            .issue_token(account.id, account.email.as_str())
            .map_err(|e| AccountError::CryptoFailure(e.to_string()))?;

        Ok(AuthenticatedSession {
            account,
            access_token,
        })
    }
}

fn rejected(operation: &'static str, err: AccountError) -> AccountError {
    tracing::info!(operation, state = %AuthState::Rejected, reason = %err, "Authentication rejected");
    err
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<AuthenticatedSession, AccountError> {
        tracing::debug!(operation = "signup", state = %AuthState::Received, email = %command.email);

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(rejected(
                "signup",
                AccountError::AlreadyExists(command.email.to_string()),
            ));
        }
        tracing::debug!(operation = "signup", state = %AuthState::Validated, email = %command.email);

        let password_hash = self.hash_password(command.password).await?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            created_at: Utc::now(),
        };

        // A concurrent signup may win between the lookup and this insert.
        let account = self.repository.insert(account).await.map_err(|e| match e {
            AccountError::AlreadyExists(_) => rejected("signup", e),
            other => other,
        })?;

        let session = self.issue_session(account)?;
        tracing::info!(
            operation = "signup",
            state = %AuthState::Authorized,
            account_id = %session.account.id,
            "Account created"
        );

        Ok(session)
    }

    async fn signin(&self, command: SigninCommand) -> Result<AuthenticatedSession, AccountError> {
        let account = self.check_password("signin", command).await?;

        let session = self.issue_session(account)?;
        tracing::info!(
            operation = "signin",
            state = %AuthState::Authorized,
            account_id = %session.account.id,
            "Token issued"
        );

        Ok(session)
    }

    fn authorize(&self, token: &str) -> Result<Identity, AccountError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| AccountError::Unauthenticated(e.to_string()))?;

        let account_id = AccountId::from_string(&claims.sub)
            .map_err(|e| AccountError::Unauthenticated(format!("Invalid subject: {}", e)))?;

        Ok(Identity {
            account_id,
            email: claims.email,
        })
    }

    async fn validate(&self, credentials: Credentials) -> Result<Identity, AccountError> {
        match credentials {
            Credentials::Password(command) => {
                let account = self.check_password("validate", command).await?;
                tracing::debug!(
                    operation = "validate",
                    state = %AuthState::Authorized,
                    account_id = %account.id
                );
                Ok(Identity {
                    account_id: account.id,
                    email: account.email.to_string(),
                })
            }
            Credentials::Bearer(token) => self.authorize(&token),
        }
    }

    async fn profile(&self, identity: &Identity) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(&identity.account_id)
            .await?
            .ok_or(AccountError::NotFound(identity.account_id.to_string()))
    }
}
