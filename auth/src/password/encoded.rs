use std::fmt;

use super::errors::PasswordError;

/// Length in bytes of the derived key stored in every hash.
pub const DERIVED_KEY_LENGTH: usize = 64;

const SEPARATOR: char = ':';

/// Number of random salt bytes used for a single hash.
///
/// Always within `[MIN, MAX]`: any requested length is clamped so hashes are
/// neither weak nor unbounded in size, whatever the caller passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaltLength(usize);

impl SaltLength {
    pub const MIN: usize = 16;
    pub const MAX: usize = 32;

    /// Build a salt length from a caller-supplied hint, clamped to `[MIN, MAX]`.
    pub fn clamped(hint: usize) -> Self {
        Self(hint.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for SaltLength {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Encoded password hash in `salt:derivedKey` form, both parts lowercase hex.
///
/// The `Debug` implementation is redacted and there is no `Display`, so a hash
/// cannot end up in logs by accident. Compare hashes only through
/// [`PasswordHasher::verify`](super::PasswordHasher::verify).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub(crate) fn from_parts(salt_hex: &str, key: &[u8]) -> Self {
        Self(format!("{}{}{}", salt_hex, SEPARATOR, hex::encode(key)))
    }

    /// Parse a stored hash, checking its shape.
    ///
    /// # Errors
    /// * `MalformedHash` - Missing separator, non-hex parts, salt outside the
    ///   allowed length range or a derived key of the wrong size
    pub fn parse(encoded: impl Into<String>) -> Result<Self, PasswordError> {
        let hash = Self(encoded.into());
        hash.split()?;
        Ok(hash)
    }

    /// Salt (hex string) and raw derived key.
    pub(crate) fn split(&self) -> Result<(&str, Vec<u8>), PasswordError> {
        let (salt, key) = self
            .0
            .split_once(SEPARATOR)
            .ok_or_else(|| PasswordError::MalformedHash("missing separator".to_string()))?;

        let salt_bytes = hex::decode(salt)
            .map_err(|e| PasswordError::MalformedHash(format!("invalid salt: {}", e)))?;
        if !(SaltLength::MIN..=SaltLength::MAX).contains(&salt_bytes.len()) {
            return Err(PasswordError::MalformedHash(format!(
                "salt length {} outside [{}, {}]",
                salt_bytes.len(),
                SaltLength::MIN,
                SaltLength::MAX
            )));
        }

        let key = hex::decode(key)
            .map_err(|e| PasswordError::MalformedHash(format!("invalid derived key: {}", e)))?;
        if key.len() != DERIVED_KEY_LENGTH {
            return Err(PasswordError::MalformedHash(format!(
                "derived key is {} bytes, expected {}",
                key.len(),
                DERIVED_KEY_LENGTH
            )));
        }

        Ok((salt, key))
    }

    /// Hex-encoded salt part.
    pub fn salt(&self) -> &str {
        self.0.split(SEPARATOR).next().unwrap_or_default()
    }

    /// Encoded form, for persistence only.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
