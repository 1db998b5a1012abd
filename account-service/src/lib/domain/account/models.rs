use std::fmt;
use std::str::FromStr;

use auth::PasswordHash;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::PersonNameError;

/// Account aggregate entity.
///
/// A registered user record. Immutable once stored.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    ///
    /// # Returns
    /// AccountId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored and compared
/// exactly as given (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of an account holder.
///
/// Trimmed, non-empty, at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 64;

    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 64 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 {
            Err(PersonNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password as received from the caller.
///
/// Never stored; `Debug` is redacted.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is empty
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            Err(PasswordPolicyError::Empty)
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

impl SignupCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `email` - Validated email address (login key)
    /// * `password` - Plain text password (will be hashed by service)
    /// * `first_name` - Validated first name
    /// * `last_name` - Validated last name
    pub fn new(
        email: EmailAddress,
        password: Password,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        Self {
            email,
            password,
            first_name,
            last_name,
        }
    }
}

/// Command to sign in with email and password.
///
/// The email is kept raw: an address that fails validation simply cannot
/// match a stored account.
#[derive(Debug)]
pub struct SigninCommand {
    pub email: String,
    pub password: String,
}

impl SigninCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Credentials a caller can present, one variant per authentication strategy.
#[derive(Debug)]
pub enum Credentials {
    /// Email and password, checked against the stored hash.
    Password(SigninCommand),
    /// Previously issued access token.
    Bearer(String),
}

/// Proven identity of a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
    pub email: String,
}

/// Account plus the access token issued for it.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub account: Account,
    pub access_token: String,
}

/// Per-request authentication state, reported in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Received,
    Validated,
    Authorized,
    Rejected,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            AuthState::Received => "received",
            AuthState::Validated => "validated",
            AuthState::Authorized => "authorized",
            AuthState::Rejected => "rejected",
        };
        f.write_str(state)
    }
}
