use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::SecretHashError;

/// Secret hashing implementation.
///
/// Wraps Argon2id with a fresh random salt per call, so hashing the same
/// secret twice yields different outputs. Deliberately expensive to
/// resist brute force; holds no state, so concurrent hashing proceeds
/// without any shared lock.
pub struct SecretHasher;

impl SecretHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext secret for storage.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to hash
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Hash operation failed (entropy source failure)
    pub fn hash(&self, secret: &str) -> Result<String, SecretHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SecretHashError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext secret against a stored hash.
    ///
    /// Returns `false` for any mismatch, including stored hashes that are
    /// not valid PHC strings; a corrupt record must read as "wrong
    /// secret", not as an internal failure.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `stored` - Stored hash in PHC string format
    pub fn verify(&self, secret: &str, stored: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored) {
            Ok(hash) => hash,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self::new()
    }
}
