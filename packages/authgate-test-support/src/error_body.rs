//! Error body test helpers
//!
//! Asserts the JSON error contract without depending on authgate types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the error body emitted by the service
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that a ServiceResponse conforms to the error contract
///
/// Validates:
/// - HTTP status matches expected
/// - Content-Type is JSON
/// - x-trace-id header exists and matches body trace_id
/// - `WWW-Authenticate: Bearer` is present exactly on 401 responses
/// - code and message match expected values
///
/// Returns the parsed body for further assertions.
pub async fn assert_error_body(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: &str,
) -> ErrorBodyLike {
    assert_eq!(resp.status(), expected_status);

    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    let www_auth = headers.get(WWW_AUTHENTICATE);
    if expected_status == StatusCode::UNAUTHORIZED {
        assert_eq!(
            www_auth.and_then(|v| v.to_str().ok()),
            Some("Bearer"),
            "401 responses must carry WWW-Authenticate: Bearer"
        );
    } else {
        assert!(
            www_auth.is_none(),
            "only 401 responses carry WWW-Authenticate"
        );
    }

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8")
        .to_string();

    let body = actix_web::test::read_body(resp).await;
    let parsed: ErrorBodyLike =
        serde_json::from_slice(&body).expect("Response body should be a JSON error body");

    assert_eq!(
        parsed.trace_id, trace_id,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(parsed.code, expected_code);
    assert_eq!(parsed.message, expected_message);

    parsed
}
