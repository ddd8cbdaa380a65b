use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenCodec;
use crate::repos::users::UserStore;

/// Application state containing shared resources
///
/// Everything here is read-only after startup; the user store owns its own
/// synchronization.
#[derive(Clone)]
pub struct AppState {
    /// Token codec built from the security configuration
    pub codec: TokenCodec,
    /// Credential and identity lookups
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Create a new AppState with the given user store and security config
    pub fn new(users: Arc<dyn UserStore>, security: SecurityConfig) -> Self {
        Self {
            codec: TokenCodec::new(security),
            users,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("algorithm", &self.codec.security().algorithm)
            .field("token_ttl", &self.codec.security().token_ttl)
            .finish_non_exhaustive()
    }
}
