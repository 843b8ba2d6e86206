//! Session token issuing and verification.
//!
//! Tokens are HMAC-signed JWTs carrying the user id, issue time and expiry.
//! Nothing is stored server-side; verification is signature plus expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::TOKEN_TTL_HOURS;

/// Token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Wrong key or a signing algorithm outside the HMAC family
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("invalid token claims")]
    InvalidClaims,

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Utf8(_) => {
                TokenError::Malformed
            }
            JwtErrorKind::Json(_) | JwtErrorKind::MissingRequiredClaim(_) => {
                TokenError::InvalidClaims
            }
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            JwtErrorKind::InvalidSignature
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::InvalidAlgorithmName
            | JwtErrorKind::InvalidKeyFormat => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Tokens expire exactly at `exp`
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `user_id`, valid for 24 hours from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_with_clock(user_id, Utc::now())
    }

    fn issue_with_clock(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            user_id,
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-minimum-32-chars!!";

    /// Base64url of `{"alg":"RS256","typ":"JWT"}`
    const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = TokenService::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(TOKEN_TTL_HOURS + 1);

        let token = service.issue_with_clock(Uuid::new_v4(), issued_at).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_rejected_seconds_after_expiry() {
        let service = TokenService::new(SECRET);

        for seconds_late in [1, 30, 59] {
            let issued_at =
                Utc::now() - Duration::hours(TOKEN_TTL_HOURS) - Duration::seconds(seconds_late);
            let token = service.issue_with_clock(Uuid::new_v4(), issued_at).unwrap();

            assert_eq!(service.verify(&token), Err(TokenError::Expired), "{seconds_late}s");
        }
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let service = TokenService::new(SECRET);
        let token = service.issue(Uuid::new_v4()).unwrap();

        // Same claims and signature, header claims RS256
        let (_, rest) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", RS256_HEADER, rest);

        assert_eq!(service.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_other_hmac_algorithms_accepted() {
        let service = TokenService::new(SECRET);
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims {
            user_id,
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new(b"another-secret-key-minimum-32-chars");
        let verifier = TokenService::new(SECRET);

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = TokenService::new(SECRET);
        assert_eq!(service.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(service.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_missing_claims_rejected() {
        #[derive(Serialize)]
        struct Partial {
            exp: i64,
        }

        let service = TokenService::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::InvalidClaims));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let service = TokenService::new(SECRET);
        assert!(!format!("{:?}", service).contains("test-secret"));
    }
}
