use thiserror::Error;

/// Error type for secret hashing.
#[derive(Debug, Clone, Error)]
pub enum SecretHashError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),
}
