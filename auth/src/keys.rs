use rand::rngs::OsRng;
use rand::RngCore;

/// Minimum key length in bytes (256 bits, required for HS256).
pub const MIN_KEY_LENGTH: usize = 32;

/// Error type for signing key construction.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Symmetric signing key shared by token issuance and verification.
///
/// Generated once at process start and held in memory for the process
/// lifetime. The key is never persisted, so a restart invalidates every
/// previously issued token.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Generate a fresh key from the operating system entropy source.
    ///
    /// # Returns
    /// SigningKey with 32 cryptographically random bytes
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; MIN_KEY_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Construct a key from externally supplied bytes.
    ///
    /// # Arguments
    /// * `bytes` - Key material, at least 32 bytes
    ///
    /// # Errors
    /// * `TooShort` - Key material is shorter than 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() < MIN_KEY_LENGTH {
            return Err(KeyError::TooShort {
                min: MIN_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Get the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Keep key material out of debug output.
impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.0.len())
            .finish()
    }
}
