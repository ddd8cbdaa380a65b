use actix_web::error::ResponseError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::jwt::TokenError;
use crate::web::trace_ctx;

/// JSON body written for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("CredentialsInvalid")]
    CredentialsInvalid,
    #[error("TokenMalformed")]
    TokenMalformed,
    #[error("TokenSignatureInvalid")]
    TokenSignatureInvalid,
    #[error("TokenExpired")]
    TokenExpired,
    /// Token verified but its subject is no longer in the user store
    #[error("TokenSubjectUnknown")]
    TokenSubjectUnknown,
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::CredentialsInvalid => "CREDENTIALS_INVALID",
            AppError::TokenMalformed => "TOKEN_MALFORMED",
            AppError::TokenSignatureInvalid => "TOKEN_SIGNATURE_INVALID",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::TokenSubjectUnknown => "TOKEN_SUBJECT_UNKNOWN",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    /// Human-readable message written to the response body.
    ///
    /// All token failures share one message; the code tells them apart.
    pub fn message(&self) -> String {
        match self {
            AppError::CredentialsInvalid => "Wrong credentials".to_string(),
            AppError::TokenMalformed
            | AppError::TokenSignatureInvalid
            | AppError::TokenExpired
            | AppError::TokenSubjectUnknown => "Token is invalid".to_string(),
            AppError::Unauthenticated => "Auth required".to_string(),
            AppError::Conflict { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
            AppError::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::CredentialsInvalid => StatusCode::BAD_REQUEST,
            AppError::TokenMalformed
            | AppError::TokenSignatureInvalid
            | AppError::TokenExpired
            | AppError::TokenSubjectUnknown => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn credentials_invalid() -> Self {
        Self::CredentialsInvalid
    }

    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn conflict(detail: String) -> Self {
        Self::Conflict { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => AppError::TokenMalformed,
            TokenError::InvalidSignature => AppError::TokenSignatureInvalid,
            TokenError::Expired => AppError::TokenExpired,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, error = %self, "request failed with server error");
        }

        let body = ErrorBody {
            message: self.message(),
            code: self.code().to_string(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")));
        }
        builder.json(body)
    }
}
