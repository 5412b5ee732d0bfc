//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs carrying the user id and the hash of the one-time
//! code that minted them, valid for seven days.

use crate::errors::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Session token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Platform user id the session belongs to
    pub user_id: String,
    /// SHA-256 hex of the one-time code that minted this session
    pub code_hash: String,
    /// Issue time, RFC 3339
    pub created_at: String,
    /// Expiry as a unix timestamp, validated on decode
    pub exp: i64,
}

/// Signs and verifies session tokens with a symmetric key.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    /// Creates a signer from the shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a session token for `user_id`, returning the encoded token and
    /// its claims.
    pub fn issue(&self, user_id: &str, code_hash: &str) -> Result<(String, Claims)> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            code_hash: code_hash.to_string(),
            created_at: now.to_rfc3339(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)?;
        Ok((token, claims))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let signer = TokenSigner::new("test-secret");
        let (token, issued) = signer.issue("user-1", "abc123").unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.code_hash, "abc123");
        assert_eq!(claims.created_at, issued.created_at);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let signer = TokenSigner::new("test-secret");
        let (token, _) = signer.issue("user-1", "abc123").unwrap();

        let mut tampered = token;
        tampered.pop();
        tampered.push('x');
        assert!(signer.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let (token, _) = TokenSigner::new("key-a").issue("user-1", "abc123").unwrap();
        assert!(TokenSigner::new("key-b").verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            user_id: "user-1".to_string(),
            code_hash: "abc123".to_string(),
            created_at: Utc::now().to_rfc3339(),
            exp: Utc::now().timestamp() - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(TokenSigner::new("test-secret").verify(&token).is_err());
    }
}
