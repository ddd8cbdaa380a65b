use std::time::SystemTime;

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{web, Either, HttpRequest, HttpResponse, Resource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::logging::pii::{redact, redact_email};
use crate::state::app_state::AppState;

/// Credential submission, accepted as JSON or as a urlencoded form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange email + password for a signed access token.
///
/// Unknown email and wrong password produce the same `CredentialsInvalid`
/// response.
async fn login(
    body: Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let credentials = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let user = app_state
        .users
        .verify_credentials(&credentials.email, &credentials.password)
        .await
        .map_err(|e| {
            warn!(email = %redact_email(&credentials.email), reason = %e, "login rejected");
            AppError::from(e)
        })?;

    let token = app_state.codec.issue(user.id, SystemTime::now())?;
    info!(user_id = user.id, "issued access token");

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

// An unreadable body is a failed credential submission like any other.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %redact(&err.to_string()), "unreadable JSON login body");
    AppError::credentials_invalid().into()
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %redact(&err.to_string()), "unreadable form login body");
    AppError::credentials_invalid().into()
}

fn login_resource(path: &str) -> Resource {
    web::resource(path)
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .route(web::post().to(login))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_resource("/api/auth/login"));
    // Short alias for older clients
    cfg.service(login_resource("/login"));
}
