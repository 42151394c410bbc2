use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::keys::SigningKey;

/// Verifies presented tokens against the process signing key.
///
/// Verification is a pure, local function of (token, key, current time):
/// no storage or network access. The failure taxonomy follows the
/// structural order of checks: envelope shape, then signature, then
/// payload decode, then expiry.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the given signing key.
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry comparison is exact: a token is invalid at its expiry instant.
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
        }
    }

    /// Verify a token and recover its claims.
    ///
    /// # Arguments
    /// * `token` - Serialized token string
    ///
    /// # Errors
    /// * `Malformed` - Envelope or payload cannot be parsed
    /// * `InvalidSignature` - Signature does not match header+payload
    /// * `Expired` - Claims are valid but past their expiry
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::jwt::claims::TokenKind;
    use crate::jwt::issuer::TokenIssuer;

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(b"test-secret-key-for-jwt-signing-at-least-32-bytes")
            .expect("Failed to construct key")
    }

    fn other_key() -> SigningKey {
        SigningKey::from_bytes(b"other-secret-key-for-jwt-signing-at-least-32-byte")
            .expect("Failed to construct key")
    }

    #[test]
    fn test_verify_round_trips_claims() {
        let key = test_key();
        let issuer = TokenIssuer::with_default_ttls(&key);
        let verifier = TokenVerifier::new(&key);

        let pair = issuer
            .issue("account-1", "alice@example.com", "admin")
            .expect("Failed to issue tokens");

        let claims = verifier
            .verify(&pair.access_token)
            .expect("Failed to verify access token");
        assert_eq!(claims.sub, "account-1");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.exp > claims.iat);

        let refresh_claims = verifier
            .verify(&pair.refresh_token)
            .expect("Failed to verify refresh token");
        assert_eq!(refresh_claims.kind, TokenKind::Refresh);
        assert_eq!(refresh_claims.sub, "account-1");
    }

    #[test]
    fn test_verify_rejects_garbage_as_malformed() {
        let verifier = TokenVerifier::new(&test_key());

        let result = verifier.verify("not-even-a-token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_key_as_invalid_signature() {
        let issuer = TokenIssuer::with_default_ttls(&test_key());
        let verifier = TokenVerifier::new(&other_key());

        let pair = issuer
            .issue("account-1", "alice@example.com", "user")
            .expect("Failed to issue tokens");

        assert_eq!(
            verifier.verify(&pair.access_token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_rejects_expired_as_expired_only() {
        let key = test_key();
        let issuer = TokenIssuer::with_default_ttls(&key);
        let verifier = TokenVerifier::new(&key);

        // Issued far enough in the past that both tokens are expired.
        let issued_at = Utc::now() - Duration::hours(200);
        let pair = issuer
            .issue_at(issued_at, "account-1", "alice@example.com", "user")
            .expect("Failed to issue tokens");

        assert_eq!(verifier.verify(&pair.access_token), Err(TokenError::Expired));
        assert_eq!(
            verifier.verify(&pair.refresh_token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_verify_rejects_every_single_bit_flip_in_signature() {
        let key = test_key();
        let issuer = TokenIssuer::with_default_ttls(&key);
        let verifier = TokenVerifier::new(&key);

        let pair = issuer
            .issue("account-1", "alice@example.com", "user")
            .expect("Failed to issue tokens");

        let (prefix, signature) = pair
            .access_token
            .rsplit_once('.')
            .expect("Token missing signature segment");
        let mut signature_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .expect("Failed to decode signature");

        for byte_index in 0..signature_bytes.len() {
            for bit in 0..8 {
                signature_bytes[byte_index] ^= 1 << bit;
                let tampered = format!(
                    "{}.{}",
                    prefix,
                    URL_SAFE_NO_PAD.encode(&signature_bytes)
                );

                assert_eq!(
                    verifier.verify(&tampered),
                    Err(TokenError::InvalidSignature),
                    "bit {} of byte {} survived tampering",
                    bit,
                    byte_index
                );

                signature_bytes[byte_index] ^= 1 << bit;
            }
        }
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let key = test_key();
        let issuer = TokenIssuer::with_default_ttls(&key);
        let verifier = TokenVerifier::new(&key);

        let pair = issuer
            .issue("account-1", "alice@example.com", "user")
            .expect("Failed to issue tokens");

        let mut parts: Vec<&str> = pair.access_token.split('.').collect();
        let payload = serde_json::json!({
            "sub": "account-1",
            "email": "alice@example.com",
            "role": "admin",
            "kind": "access",
            "iat": 0,
            "exp": i64::MAX,
        });
        let forged = URL_SAFE_NO_PAD.encode(payload.to_string());
        parts[1] = &forged;

        assert_eq!(
            verifier.verify(&parts.join(".")),
            Err(TokenError::InvalidSignature)
        );
    }
}
