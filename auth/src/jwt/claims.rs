use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// Standard RFC 7519 `sub`, `iat` and `exp` plus the account email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email address
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `sub` - Account identifier
    /// * `email` - Account email
    /// * `issued_at` - Issue time
    /// * `ttl` - Lifetime of the token
    pub fn new(
        sub: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Create claims issued now and valid for `ttl`.
    pub fn for_account(sub: impl ToString, email: impl ToString, ttl: Duration) -> Self {
        Self::new(sub, email, Utc::now(), ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_account() {
        let claims = Claims::for_account("user123", "a@x.com", Duration::hours(24));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_new_uses_issue_time() {
        let issued_at = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = Claims::new("user123", "a@x.com", issued_at, Duration::seconds(60));

        assert_eq!(claims.iat, 1000);
        assert_eq!(claims.exp, 1060);
    }
}
