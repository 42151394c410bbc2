//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Secret hashing (Argon2id)
//! - Symmetric signing key management
//! - Token issuance and verification (HS256 access/refresh pairs)
//! - Authentication coordination
//!
//! Each service defines its own domain model and adapts these
//! implementations; this crate knows nothing about HTTP or storage.
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use auth::SecretHasher;
//!
//! let hasher = SecretHasher::new();
//! let hash = hasher.hash("my_secret").unwrap();
//! assert!(hasher.verify("my_secret", &hash));
//! assert!(!hasher.verify("wrong_secret", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenIssuer, TokenVerifier};
//!
//! let key = SigningKey::generate();
//! let issuer = TokenIssuer::with_default_ttls(&key);
//! let verifier = TokenVerifier::new(&key);
//!
//! let pair = issuer.issue("account-1", "alice@example.com", "user").unwrap();
//! let claims = verifier.verify(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "account-1");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningKey};
//!
//! let key = SigningKey::generate();
//! let auth = Authenticator::new(&key);
//!
//! // Signup: hash the secret for storage
//! let hash = auth.hash_secret("secret123").unwrap();
//!
//! // Login: verify the secret and mint a token pair
//! let tokens = auth
//!     .authenticate("secret123", &hash, "account-1", "alice@example.com", "user")
//!     .unwrap();
//!
//! // Gate: validate the presented bearer token
//! let claims = auth.verify_access_token(&tokens.access_token).unwrap();
//! assert_eq!(claims.role, "user");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenKind;
pub use jwt::TokenPair;
pub use jwt::TokenVerifier;
pub use keys::KeyError;
pub use keys::SigningKey;
pub use password::SecretHashError;
pub use password::SecretHasher;
