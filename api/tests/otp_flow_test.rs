//! End-to-end OTP flow over the HTTP surface: sign-up issues a code,
//! wrong submissions fail without side effects, the right one verifies.

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Utc;
use serde_json::{json, Value};

use common::test_context;
use tb_api::app::create_app;
use tb_core::repositories::{UserRepository, VerificationCodeRepository};

#[actix_rt::test]
async fn sign_up_then_verify_via_http() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;

    // Sign up
    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({
            "email": "a@x.com",
            "password": "correct-horse",
            "name": "Ada"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["email_verified"], false);
    assert!(body["session"].is_null());

    // Exactly one valid code exists and was emailed
    let active = ctx.codes.find_active("a@x.com", Utc::now()).await.unwrap();
    assert_eq!(active.len(), 1);
    let emailed = ctx.mailer.last_code_for("a@x.com").await.unwrap();
    assert_eq!(emailed, active[0].value);
    assert_eq!(emailed.len(), 6);

    // Status reports unverified
    let req = test::TestRequest::get()
        .uri("/api/verification-status/a@x.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["emailVerified"], false);
    assert_eq!(body["email"], "a@x.com");

    // A wrong code fails with the envelope and leaves the row alone
    let wrong = if emailed == "999999" { "999998" } else { "999999" };
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({"email": "a@x.com", "code": wrong}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid or expired"));
    assert_eq!(ctx.codes.count_for("a@x.com").await, 1);

    // The right code verifies
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({"email": "a@x.com", "code": emailed}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);

    let user = ctx.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(user.email_verified);
    assert_eq!(ctx.codes.count_for("a@x.com").await, 0);

    // The code is spent: replaying it fails
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({"email": "a@x.com", "code": emailed}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Status flipped
    let req = test::TestRequest::get()
        .uri("/api/verification-status/a@x.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["emailVerified"], true);
}

#[actix_rt::test]
async fn verify_with_malformed_body_is_rejected() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;

    // Wrong code length fails DTO validation
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({"email": "a@x.com", "code": "123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Invalid email fails DTO validation
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({"email": "not-an-email", "code": "123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn status_for_unknown_user_is_404() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/verification-status/ghost@x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_email_endpoint_returns_plaintext_code() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;

    let req = test::TestRequest::post()
        .uri("/test-email")
        .set_json(json!({"email": "diag@x.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(
        ctx.mailer.last_code_for("diag@x.com").await.as_deref(),
        Some(code)
    );
}
