use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::middleware::access_guard::AccessGuard;

#[derive(Debug, Serialize)]
struct UserResponse {
    user: CurrentUser,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    authenticated: bool,
    user: Option<CurrentUser>,
}

/// Protected: only reachable with a resolved identity.
async fn get_user(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse { user: current_user }))
}

/// Public: reports whoever the request authenticated as, if anyone.
async fn session(current_user: Option<CurrentUser>) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        authenticated: current_user.is_some(),
        user: current_user,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/user")
            .route(web::get().to(get_user))
            .wrap(AccessGuard),
    );
    cfg.service(
        web::resource("/get-user")
            .route(web::get().to(get_user))
            .wrap(AccessGuard),
    );
    cfg.service(web::resource("/api/session").route(web::get().to(session)));
}
