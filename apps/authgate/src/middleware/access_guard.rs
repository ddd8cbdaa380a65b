//! Access guard middleware
//!
//! Wraps a resource or scope and refuses requests that reached it without a
//! resolved identity. Must sit inside `Authenticate`, which attaches the
//! [`AuthContext`] it inspects:
//!
//! App::new()
//!     .wrap(Authenticate)
//!     .service(web::resource("/api/user").wrap(AccessGuard).route(..))

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::context::AuthContext;
use crate::error::AppError;

#[derive(Clone, Default)]
pub struct AccessGuard;

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware { service }))
    }
}

pub struct AccessGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // A missing context means Authenticate never ran; fail closed.
        let authenticated = req
            .extensions()
            .get::<AuthContext>()
            .is_some_and(AuthContext::is_authenticated);

        if !authenticated {
            debug!(path = %req.path(), "access guard rejected anonymous request");
            return Box::pin(async move { Ok(req.error_response(AppError::unauthenticated())) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_boxed_body()) })
    }
}
