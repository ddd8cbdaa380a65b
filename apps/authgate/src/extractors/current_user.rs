use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::auth::context::AuthContext;
use crate::error::AppError;
use crate::repos::users::{User, UserId};

/// Authenticated caller, read from the [`AuthContext`] that the
/// `Authenticate` middleware attached to the request.
///
/// Extracting it on a handler is a handler-level access guard: anonymous
/// requests fail with `AppError::Unauthenticated`. Use `Option<CurrentUser>`
/// on routes that serve both.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let current = req
            .extensions()
            .get::<AuthContext>()
            .and_then(AuthContext::identity)
            .map(CurrentUser::from);

        ready(current.ok_or_else(AppError::unauthenticated))
    }
}
