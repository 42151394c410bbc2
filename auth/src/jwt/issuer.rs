use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::TokenError;
use crate::keys::SigningKey;

/// Default access token lifetime: 24 hours.
pub const DEFAULT_ACCESS_TTL_HOURS: i64 = 24;

/// Default refresh token lifetime: 168 hours (7 days).
pub const DEFAULT_REFRESH_TTL_HOURS: i64 = 168;

/// A freshly issued access/refresh token pair.
///
/// Both tokens are opaque strings to the holder; only the signing key
/// that produced them can validate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues signed access and refresh tokens.
///
/// Signs claim sets with HS256 using the process signing key. The key is
/// injected at construction; the issuer holds no other state and is safe
/// to share across concurrent requests.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with explicit token lifetimes.
    ///
    /// # Arguments
    /// * `key` - Process signing key
    /// * `access_ttl` - Access token lifetime
    /// * `refresh_ttl` - Refresh token lifetime
    pub fn new(key: &SigningKey, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Create an issuer with the default 24h/168h lifetimes.
    pub fn with_default_ttls(key: &SigningKey) -> Self {
        Self::new(
            key,
            Duration::hours(DEFAULT_ACCESS_TTL_HOURS),
            Duration::hours(DEFAULT_REFRESH_TTL_HOURS),
        )
    }

    /// Issue an access/refresh token pair for a subject.
    ///
    /// # Arguments
    /// * `subject` - Account identifier
    /// * `email` - Account email
    /// * `role` - Account role at issuance time
    ///
    /// # Errors
    /// * `Signing` - Token signing failed
    pub fn issue(&self, subject: &str, email: &str, role: &str) -> Result<TokenPair, TokenError> {
        self.issue_at(Utc::now(), subject, email, role)
    }

    /// Issue a token pair with an explicit issuance instant.
    ///
    /// Exists so tests can control the clock; production callers use
    /// [`TokenIssuer::issue`].
    pub fn issue_at(
        &self,
        now: DateTime<Utc>,
        subject: &str,
        email: &str,
        role: &str,
    ) -> Result<TokenPair, TokenError> {
        let access_claims = Claims::new(
            subject,
            email,
            role,
            TokenKind::Access,
            now,
            self.access_ttl,
        );
        let refresh_claims = Claims::new(
            subject,
            email,
            role,
            TokenKind::Refresh,
            now,
            self.refresh_ttl,
        );

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }
}
