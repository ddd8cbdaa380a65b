use actix_web::web;

pub mod auth;
pub mod health;
pub mod user;

/// Register every route. The `Authenticate` middleware is app-wide and wired
/// by the caller; `AccessGuard` is applied per resource in `user`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    auth::configure_routes(cfg);
    user::configure_routes(cfg);
}
