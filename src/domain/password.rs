//! One-way password hashing.
//!
//! Argon2id with a random salt per hash. Only the PHC string is ever
//! stored; plain text never leaves this module.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hash verified against when the account does not exist, so that a
/// failed login costs the same whether or not the email is registered.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"credence-dummy", &salt)
        .ok()
        .map(|hash| hash.to_string())
});

/// Hashed password as persisted on a user document.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHashed {
    hash: String,
}

impl std::fmt::Debug for PasswordHashed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHashed")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl PasswordHashed {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Validation error if the password is shorter than the minimum length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "\"password\" length must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plain-text candidate against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        verify_hash(plain_text, &self.hash)
    }
}

/// Burn one verification against a throwaway hash.
pub fn verify_dummy(plain_text: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_hash(plain_text, hash);
    }
}

fn verify_hash(plain_text: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = PasswordHashed::new("secret1").unwrap();

        assert!(password.verify("secret1"));
        assert!(!password.verify("secret2"));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let stored = PasswordHashed::new("lovelace").unwrap().into_string();
        let restored = PasswordHashed::from_hash(stored);

        assert!(restored.verify("lovelace"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = PasswordHashed::new("samepass").unwrap();
        let second = PasswordHashed::new("samepass").unwrap();

        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn test_minimum_length() {
        assert!(PasswordHashed::new("abcd").is_err());
        assert!(PasswordHashed::new("abcde").is_ok());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let broken = PasswordHashed::from_hash("not-a-phc-string".to_string());
        assert!(!broken.verify("anything"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = PasswordHashed::new("secret1").unwrap();
        assert!(!format!("{:?}", password).contains("argon2"));
    }
}
