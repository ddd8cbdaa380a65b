//! Per-request authentication context.

use actix_web::{HttpMessage, HttpRequest};

use crate::repos::users::User;

/// Identity resolved for one request, stored in request extensions by the
/// `Authenticate` middleware.
///
/// Only the middleware constructs it; downstream code gets read access.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    identity: Option<User>,
}

impl AuthContext {
    pub(crate) fn anonymous() -> Self {
        Self { identity: None }
    }

    pub(crate) fn authenticated(user: User) -> Self {
        Self {
            identity: Some(user),
        }
    }

    pub fn identity(&self) -> Option<&User> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Context attached to `req`, if the request passed through `Authenticate`.
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<Self>().cloned()
    }
}
