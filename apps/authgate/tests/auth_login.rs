// Integration tests for the login endpoint.

mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use authgate_test_support::assert_error_body;
use serde_json::{json, Value};

use common::{SEED_EMAIL, SEED_PASSWORD};
use support::{create_test_app, seeded_state};

// ============================================================================
// Happy Path Tests
// ============================================================================

#[actix_web::test]
async fn test_login_with_seeded_user_returns_token() {
    let (state, _users, seed) = seeded_state();
    let codec = state.codec.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": SEED_EMAIL, "password": SEED_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token should be a string");
    assert!(!token.is_empty());

    let claims = codec.decode(token).expect("issued token should verify");
    assert_eq!(claims.user_id, seed.id);
    assert_eq!(claims.exp - claims.iat, 20);
}

#[actix_web::test]
async fn test_login_accepts_form_body_on_short_path() {
    let (state, _users, _seed) = seeded_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(json!({ "email": SEED_EMAIL, "password": SEED_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().is_some_and(|t| t.split('.').count() == 3));
}

#[actix_web::test]
async fn test_login_token_unlocks_protected_routes() {
    let (state, _users, seed) = seeded_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": SEED_EMAIL, "password": SEED_PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"]
        .as_str()
        .expect("login should return a token")
        .to_string();

    for (uri, header) in [
        ("/api/user", format!("Bearer {token}")),
        ("/get-user", token.clone()),
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "uri {uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "user": { "id": seed.id, "email": SEED_EMAIL } })
        );
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

#[actix_web::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let (state, _users, _seed) = seeded_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let wrong_password = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": SEED_EMAIL, "password": "not-the-password" }))
        .to_request();
    let resp = test::call_service(&app, wrong_password).await;
    let a = assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "CREDENTIALS_INVALID",
        "Wrong credentials",
    )
    .await;

    let unknown_email = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@email.com", "password": SEED_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, unknown_email).await;
    let b = assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "CREDENTIALS_INVALID",
        "Wrong credentials",
    )
    .await;

    assert_eq!(a.message, b.message);
    assert_eq!(a.code, b.code);
    assert_ne!(a.trace_id, b.trace_id);
}

#[actix_web::test]
async fn test_missing_fields_are_wrong_credentials() {
    let (state, _users, _seed) = seeded_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": SEED_EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "CREDENTIALS_INVALID",
        "Wrong credentials",
    )
    .await;
}

#[actix_web::test]
async fn test_unreadable_body_is_wrong_credentials() {
    let (state, _users, _seed) = seeded_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "text/plain"))
        .set_payload("email=user@email.com")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(
        resp,
        StatusCode::BAD_REQUEST,
        "CREDENTIALS_INVALID",
        "Wrong credentials",
    )
    .await;
}

#[actix_web::test]
async fn test_login_after_user_removed_fails() {
    let (state, users, seed) = seeded_state();
    let app = create_test_app(state).with_prod_routes().build().await;
    users.remove(seed.id);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": SEED_EMAIL, "password": SEED_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
