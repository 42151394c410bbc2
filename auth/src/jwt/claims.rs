use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Kind of token a claim set belongs to.
///
/// Carried inside the signed payload so a refresh token can never be
/// mistaken for an access token (and vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Identity claims embedded in a signed token.
///
/// A point-in-time snapshot of the account at issuance, not a live view:
/// the role recorded here is the role the account held when the token was
/// minted. All timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Account role at issuance time
    pub role: String,

    /// Access or refresh token
    pub kind: TokenKind,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp), always strictly after `iat`
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject with an expiry relative to `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Account identifier
    /// * `email` - Account email
    /// * `role` - Account role at issuance time
    /// * `kind` - Access or refresh
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Time until expiry (must be positive)
    pub fn new(
        subject: impl ToString,
        email: impl ToString,
        role: impl ToString,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiry = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            kind,
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Check whether the claims are expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
