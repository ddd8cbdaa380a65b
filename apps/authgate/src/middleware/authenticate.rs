//! Token authentication middleware
//!
//! Runs on every request. A request without an `Authorization` header
//! continues anonymously; a request carrying one must present a valid token
//! for a user that still exists, or it is rejected before reaching any
//! handler. Either way an [`AuthContext`] is attached to the request
//! extensions for downstream extractors and guards.

use std::rc::Rc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::auth::context::AuthContext;
use crate::error::AppError;
use crate::repos::users::User;
use crate::state::app_state::AppState;

pub struct Authenticate;

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthenticateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let resolved = resolve_identity(&req).await;
            match resolved {
                Ok(identity) => {
                    let context = match identity {
                        Some(user) => {
                            debug!(user_id = user.id, "request authenticated");
                            AuthContext::authenticated(user)
                        }
                        None => AuthContext::anonymous(),
                    };
                    req.extensions_mut().insert(context);

                    service
                        .call(req)
                        .await
                        .map(|res| res.map_into_boxed_body())
                }
                Err(err) => {
                    warn!(code = err.code(), "rejected request token");
                    // Render here so the body carries the request's trace id.
                    Ok(req.error_response(err))
                }
            }
        })
    }
}

/// Resolve the caller's identity from the `Authorization` header.
///
/// `Ok(None)` only when no header was sent at all.
async fn resolve_identity(req: &ServiceRequest) -> Result<Option<User>, AppError> {
    let token = match token_from_header(req.headers().get(header::AUTHORIZATION))? {
        Some(token) => token,
        None => return Ok(None),
    };

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

    let claims = app_state.codec.decode(&token)?;

    let user = app_state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or(AppError::TokenSubjectUnknown)?;

    Ok(Some(user))
}

/// Accepts `Bearer <token>` or a bare token. A header that is present but
/// empty, non-UTF-8 or uses another scheme is malformed.
fn token_from_header(header_value: Option<&HeaderValue>) -> Result<Option<String>, AppError> {
    let value = match header_value {
        Some(value) => value,
        None => return Ok(None),
    };

    let raw = value
        .to_str()
        .map_err(|_| AppError::TokenMalformed)?
        .trim();

    let token = match raw.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("Bearer") => rest.trim(),
        Some(_) => return Err(AppError::TokenMalformed),
        None => raw,
    };

    if token.is_empty() {
        return Err(AppError::TokenMalformed);
    }

    Ok(Some(token.to_string()))
}
