use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKind;
use crate::jwt::TokenPair;
use crate::jwt::TokenVerifier;
use crate::keys::SigningKey;
use crate::password::SecretHashError;
use crate::password::SecretHasher;

/// Authentication coordinator combining secret verification and token
/// issuance/verification.
///
/// Issuer and verifier share the same injected signing key; after
/// construction the authenticator is read-only and safe to share across
/// concurrent requests without synchronization.
pub struct Authenticator {
    secret_hasher: SecretHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Wrong token kind for this operation")]
    WrongTokenKind,

    #[error("Secret hashing error: {0}")]
    Hashing(#[from] SecretHashError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator with the default token lifetimes.
    ///
    /// # Arguments
    /// * `key` - Process signing key, shared by issuance and verification
    pub fn new(key: &SigningKey) -> Self {
        Self {
            secret_hasher: SecretHasher::new(),
            token_issuer: TokenIssuer::with_default_ttls(key),
            token_verifier: TokenVerifier::new(key),
        }
    }

    /// Create an authenticator with explicit token lifetimes.
    pub fn with_ttls(
        key: &SigningKey,
        access_ttl: chrono::Duration,
        refresh_ttl: chrono::Duration,
    ) -> Self {
        Self {
            secret_hasher: SecretHasher::new(),
            token_issuer: TokenIssuer::new(key, access_ttl, refresh_ttl),
            token_verifier: TokenVerifier::new(key),
        }
    }

    /// Hash a secret for storage.
    ///
    /// # Errors
    /// * `SecretHashError` - Hashing operation failed
    pub fn hash_secret(&self, secret: &str) -> Result<String, SecretHashError> {
        self.secret_hasher.hash(secret)
    }

    /// Verify a secret against a stored hash.
    ///
    /// Returns `false` for any mismatch, including malformed stored
    /// hashes.
    pub fn verify_secret(&self, secret: &str, stored_hash: &str) -> bool {
        self.secret_hasher.verify(secret, stored_hash)
    }

    /// Issue a token pair without verifying credentials.
    ///
    /// For flows where identity has already been established (signup).
    ///
    /// # Errors
    /// * `TokenError` - Token signing failed
    pub fn issue_tokens(
        &self,
        subject: &str,
        email: &str,
        role: &str,
    ) -> Result<TokenPair, TokenError> {
        self.token_issuer.issue(subject, email, role)
    }

    /// Verify a secret and issue a token pair on success.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `stored_hash` - Stored secret hash
    /// * `subject` - Account identifier for the claims
    /// * `email` - Account email for the claims
    /// * `role` - Account role for the claims
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        secret: &str,
        stored_hash: &str,
        subject: &str,
        email: &str,
        role: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.secret_hasher.verify(secret, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject, email, role)?)
    }

    /// Verify a token of any kind and recover its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_verifier.verify(token)
    }

    /// Verify a token presented as a bearer credential.
    ///
    /// A refresh token is a valid signature but not a valid credential:
    /// it must never grant access on its own.
    ///
    /// # Errors
    /// * `Token` - Token is malformed, forged, or expired
    /// * `WrongTokenKind` - Token is not an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthenticationError> {
        let claims = self.token_verifier.verify(token)?;

        if claims.kind != TokenKind::Access {
            return Err(AuthenticationError::WrongTokenKind);
        }

        Ok(claims)
    }
}
