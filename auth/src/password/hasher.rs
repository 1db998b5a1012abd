use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Argon2;

use super::encoded::PasswordHash;
use super::encoded::SaltLength;
use super::encoded::DERIVED_KEY_LENGTH;
use super::errors::PasswordError;

/// Salted password hashing.
///
/// Derives a 64-byte key with Argon2id (default work factor) from the password
/// and a fresh random salt, and stores both as `salt:derivedKey` hex.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    salt_length: SaltLength,
}

impl PasswordHasher {
    /// Create a hasher generating the minimum allowed salt length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher generating `salt_length` random salt bytes per hash.
    pub fn with_salt_length(salt_length: SaltLength) -> Self {
        Self { salt_length }
    }

    /// Hash a plaintext password with this hasher's salt length.
    ///
    /// # Errors
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        self.hash_with_salt_length(password, self.salt_length)
    }

    /// Hash a plaintext password with an explicit salt length.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    /// * `salt_length` - Number of random salt bytes
    ///
    /// # Returns
    /// Encoded `salt:derivedKey` hash
    ///
    /// # Errors
    /// * `HashingFailed` - Randomness or key derivation unavailable
    pub fn hash_with_salt_length(
        &self,
        password: &str,
        salt_length: SaltLength,
    ) -> Result<PasswordHash, PasswordError> {
        let mut salt = vec![0u8; salt_length.get()];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(format!("Randomness unavailable: {}", e)))?;
        let salt_hex = hex::encode(salt);

        let key = derive_key(password, &salt_hex)?;

        Ok(PasswordHash::from_parts(&salt_hex, &key))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a valid `salt:derivedKey` pair
    /// * `HashingFailed` - Key derivation failed
    pub fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordError> {
        let (salt_hex, expected) = hash.split()?;
        let derived = derive_key(password, salt_hex)?;

        Ok(constant_time_eq(&derived, &expected))
    }
}

fn derive_key(password: &str, salt_hex: &str) -> Result<[u8; DERIVED_KEY_LENGTH], PasswordError> {
    let mut key = [0u8; DERIVED_KEY_LENGTH];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt_hex.as_bytes(), &mut key)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(key)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_verifies_for_every_salt_length() {
        let hasher = PasswordHasher::new();

        for length in [16, 20, 24, 32] {
            let hash = hasher
                .hash_with_salt_length("pw123", SaltLength::clamped(length))
                .expect("Failed to hash password");

            assert_eq!(hash.salt().len(), length * 2);
            assert!(hasher.verify("pw123", &hash).unwrap());
        }
    }

    #[test]
    fn test_encoded_format() {
        let hasher = PasswordHasher::with_salt_length(SaltLength::clamped(24));
        let hash = hasher.hash("pw123").unwrap();

        let (salt, key) = hash.as_str().split_once(':').expect("separator");
        assert_eq!(salt.len(), 48);
        assert_eq!(key.len(), DERIVED_KEY_LENGTH * 2);
        assert!(hash
            .as_str()
            .chars()
            .all(|c| c == ':' || (c.is_ascii_hexdigit() && !c.is_ascii_uppercase())));
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("pw123").unwrap();
        let second = hasher.hash("pw123").unwrap();

        assert_ne!(first.salt(), second.salt());
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = PasswordHasher::new();
        let salt = "00".repeat(16);
        let tampered = PasswordHash::from_parts(&salt, &[0u8; 10]);

        assert!(matches!(
            hasher.verify("password", &tampered),
            Err(PasswordError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_constant_time_eq_on_derived_keys() {
        let key = [0x5au8; DERIVED_KEY_LENGTH];
        let mut last_byte_differs = key;
        last_byte_differs[DERIVED_KEY_LENGTH - 1] ^= 0x01;

        assert!(constant_time_eq(&key, &key));
        assert!(!constant_time_eq(&key, &last_byte_differs));
        assert!(!constant_time_eq(&key, &key[..DERIVED_KEY_LENGTH - 1]));
    }
}
