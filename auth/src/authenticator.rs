use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHash;
use crate::password::PasswordHasher;
use crate::password::SaltLength;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the signing secret for the lifetime of the process. Build it once at
/// startup and share it behind an `Arc`; it needs no locking.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    /// * `salt_length` - Random salt bytes per password hash
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    pub fn new(
        secret: &[u8],
        token_ttl: Duration,
        salt_length: SaltLength,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_salt_length(salt_length),
            token_issuer: TokenIssuer::new(secret)?,
            token_ttl,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed or derivation failed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &PasswordHash,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue a token for an account whose password was already checked.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, sub: impl ToString, email: impl ToString) -> Result<String, TokenError> {
        self.token_issuer.issue(sub, email, self.token_ttl)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `BadSignature` - Token is forged or malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_issuer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::minutes(10),
            SaltLength::default(),
        )
        .expect("Failed to build authenticator")
    }

    #[test]
    fn test_verify_password_then_issue_token() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        authenticator
            .verify_password(password, &hash)
            .expect("Password should match");
        let token = authenticator
            .issue_token("user123", "a@x.com")
            .expect("Failed to issue token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "user123");
        assert_eq!(decoded.email, "a@x.com");
    }

    #[test]
    fn test_verify_password_mismatch() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_password("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issued_token_uses_configured_ttl() {
        let authenticator = authenticator();

        let token = authenticator.issue_token("user123", "a@x.com").unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(TokenError::BadSignature(_))));
    }
}
