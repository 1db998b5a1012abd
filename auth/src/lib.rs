//! Credential core
//!
//! Everything needed to prove an identity, with no I/O:
//! - Salted password hashing (Argon2id, `salt:derivedKey` hex encoding)
//! - Signed, time-bounded access tokens (HS256 JWT)
//! - Authentication coordination
//!
//! Services own persistence and decide what to do with the outcomes.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = issuer.issue("user123", "a@x.com", Duration::minutes(5)).unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SaltLength};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(1),
//!     SaltLength::default(),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue token
//! auth.verify_password("password123", &hash).unwrap();
//! let token = auth.issue_token("user123", "a@x.com").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.email, "a@x.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHash;
pub use password::PasswordHasher;
pub use password::SaltLength;
