//! Bearer-authenticated todo CRUD and cross-user isolation.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::test_context;
use tb_api::app::create_app;

/// Sign up and sign in, returning a bearer token
async fn session_token(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
    >,
    email: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({"email": email, "password": "correct-horse", "name": "Ada"}))
        .to_request();
    assert_eq!(test::call_service(app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"email": email, "password": "correct-horse"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["session"]["token"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn todos_require_authentication() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;

    let req = test::TestRequest::get().uri("/api/todos").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", "Bearer bogus-token"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_rt::test]
async fn todo_crud_round_trip() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;
    let token = session_token(&app, "a@x.com").await;
    let bearer = format!("Bearer {}", token);

    // Create
    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({"title": "Buy milk", "description": "2 liters"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["completed"], false);
    let id = created["id"].as_str().unwrap().to_string();

    // List
    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Get
    let req = test::TestRequest::get()
        .uri(&format!("/api/todos/{}", id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["description"], "2 liters");

    // Update: complete it and clear the description
    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({"completed": true, "description": null}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["completed"], true);
    assert!(updated["description"].is_null());
    assert_eq!(updated["title"], "Buy milk");

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/todos/{}", id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Gone
    let req = test::TestRequest::get()
        .uri(&format!("/api/todos/{}", id))
        .insert_header(("Authorization", bearer))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn create_todo_with_empty_title_is_rejected() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;
    let token = session_token(&app, "a@x.com").await;

    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"title": ""}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_rt::test]
async fn todos_are_invisible_across_users() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.provider.clone())).await;

    let alice = session_token(&app, "alice@x.com").await;
    let bob = session_token(&app, "bob@x.com").await;

    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {}", alice)))
        .set_json(json!({"title": "Alice's secret"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Bob's list is empty
    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {}", bob)))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert!(listed.as_array().unwrap().is_empty());

    // Bob cannot fetch, update, or delete Alice's todo
    for req in [
        test::TestRequest::get()
            .uri(&format!("/api/todos/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .to_request(),
        test::TestRequest::put()
            .uri(&format!("/api/todos/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .set_json(json!({"completed": true}))
            .to_request(),
        test::TestRequest::delete()
            .uri(&format!("/api/todos/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .to_request(),
    ] {
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    // Alice still has it, untouched
    let req = test::TestRequest::get()
        .uri(&format!("/api/todos/{}", id))
        .insert_header(("Authorization", format!("Bearer {}", alice)))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["completed"], false);
}
