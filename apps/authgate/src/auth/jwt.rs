use std::time::SystemTime;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::error::AppError;
use crate::repos::users::UserId;
use crate::state::security_config::SecurityConfig;

/// Reasons a presented token is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not three base64url segments, unparsable JSON, or claims missing or
    /// of the wrong type
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the header and payload under our secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Signature is valid but `exp` is not strictly in the future
    #[error("token has expired")]
    Expired,
}

/// Signs and verifies HS256 access tokens with a fixed secret.
///
/// Built once from [`SecurityConfig`] and shared read-only by every request.
#[derive(Clone)]
pub struct TokenCodec {
    security: SecurityConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(security: SecurityConfig) -> Self {
        // Pin the algorithm; expiry is checked by us against an explicit clock
        // with no leeway.
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
            security,
        }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Sign `claims` into a compact `header.payload.signature` token.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(
            &Header::new(self.security.algorithm),
            claims,
            &self.encoding_key,
        )
        .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Mint a token for `user_id` valid for the configured TTL from `now`.
    pub fn issue(&self, user_id: UserId, now: SystemTime) -> Result<String, AppError> {
        let claims = Claims::new(user_id, now, self.security.token_ttl)?;
        self.encode(&claims)
    }

    /// Verify `token` against the current wall clock.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, SystemTime::now())
    }

    /// Verify `token` as of `now`.
    ///
    /// Errors:
    /// - wrong algorithm or signature mismatch → [`TokenError::InvalidSignature`]
    /// - `exp` at or before `now` → [`TokenError::Expired`]
    /// - anything else that fails to parse → [`TokenError::Malformed`]
    pub fn decode_at(&self, token: &str, now: SystemTime) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.security.algorithm)
            .field("token_ttl", &self.security.token_ttl)
            .finish_non_exhaustive()
    }
}
