//! Claims carried inside authgate access tokens.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::repos::users::UserId;

/// Claims embedded in every access token minted at login.
///
/// All three fields are required on decode; a token missing any of them, or
/// carrying a non-integer value, is rejected as malformed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identity reference resolved against the user store per request
    pub user_id: UserId,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `user_id` issued at `now` and valid for `ttl`.
    pub fn new(user_id: UserId, now: SystemTime, ttl: Duration) -> Result<Self, AppError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
            .as_secs();
        let iat = i64::try_from(iat)
            .map_err(|_| AppError::internal(format!("issue time {iat}s out of range")))?;

        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|ttl_secs| iat.checked_add(ttl_secs))
            .ok_or_else(|| {
                AppError::internal(format!("token TTL of {}s overflows expiry", ttl.as_secs()))
            })?;

        Ok(Self { user_id, iat, exp })
    }

    /// True when `now` has reached or passed `exp`. A token is only valid
    /// while its expiry is strictly in the future.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        let now = now.duration_since(UNIX_EPOCH).unwrap_or_default();
        match u64::try_from(self.exp) {
            Ok(exp) => Duration::from_secs(exp) <= now,
            Err(_) => true,
        }
    }
}
