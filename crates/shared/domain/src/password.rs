//! Password value object - Domain layer password handling.
//!
//! DDD: Encapsulates password hashing as a domain value object.
//! DRY: Centralized Argon2 configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::constants::{
    MIN_PASSWORD_LENGTH, PASSWORD_HASH_ITERATIONS, PASSWORD_HASH_MEMORY_KIB,
    PASSWORD_HASH_PARALLELISM,
};
use crate::error::{DomainError, DomainResult};

/// Password value object that handles hashing and verification.
///
/// Only the salted hash is ever held; the plain text passed to
/// [`Password::new`] is not retained.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns a validation error on the `password` field if the plain text
    /// is shorter than [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::check_length(plain_text)?;

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Validate the minimum length without hashing.
    pub fn check_length(plain_text: &str) -> DomainResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::invalid_field(
                "password",
                format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }
        Ok(())
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()?
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    /// Argon2id with a fixed work factor.
    fn argon2() -> DomainResult<Argon2<'static>> {
        let params = Params::new(
            PASSWORD_HASH_MEMORY_KIB,
            PASSWORD_HASH_ITERATIONS,
            PASSWORD_HASH_PARALLELISM,
            None,
        )
        .map_err(|e| DomainError::internal(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "secret1";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("secret2"));
        assert!(!password.verify(""));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_hash_is_not_plain_text() {
        let password = Password::new("secret1").unwrap();

        assert_ne!(password.as_str(), "secret1");
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_password_too_short() {
        let err = Password::new("abc").unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.fields()[0].field, "password");
    }

    #[test]
    fn test_password_minimum_length() {
        // Exactly 6 characters should work
        assert!(Password::new("123456").is_ok());
        assert!(Password::new("12345").is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(Password::check_length("ééééé").is_err());
        assert!(Password::check_length("éééééé").is_ok());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret1").unwrap();
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }

    #[test]
    fn test_verify_against_garbage_hash() {
        let password = Password::from_hash("not-a-phc-string".to_string());
        assert!(!password.verify("anything"));
    }
}
