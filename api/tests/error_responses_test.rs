//! Tests for the cross-cutting HTTP surface: error shapes, localization,
//! the default 404, and the health endpoint.

mod common;

use actix_web::{http::header, test};
use serde_json::json;

use common::harness;
use signet_api::app::create_app;

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let h = harness();
    let app = test::init_service(create_app(
        h.app_state.clone(),
        h.health_state.clone(),
        h.verifier.clone(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/v1/nonsense").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_error_shape_has_code_message_timestamp() {
    let h = harness();
    let app = test::init_service(create_app(
        h.app_state.clone(),
        h.health_state.clone(),
        h.verifier.clone(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "ghost@example.com", "password": "whatever-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
    assert_eq!(body["message"], "Invalid email or password");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_errors_localize_to_chinese() {
    let h = harness();
    let app = test::init_service(create_app(
        h.app_state.clone(),
        h.health_state.clone(),
        h.verifier.clone(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header((header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9"))
        .set_json(json!({"email": "ghost@example.com", "password": "whatever-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
    assert_eq!(body["message"], "邮箱或密码错误");
}

#[actix_web::test]
async fn test_logout_message_localizes() {
    let h = harness();
    let app = test::init_service(create_app(
        h.app_state.clone(),
        h.health_state.clone(),
        h.verifier.clone(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"email": "alice@example.com", "password": "sturdy-pass-1"}))
        .to_request();
    let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let refresh_token = body["tokens"]["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::ACCEPT_LANGUAGE, "zh-CN"))
        .set_json(json!({"refresh_token": refresh_token}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "登出成功");
}

#[actix_web::test]
async fn test_malformed_email_is_bad_request() {
    let h = harness();
    let app = test::init_service(create_app(
        h.app_state.clone(),
        h.health_state.clone(),
        h.verifier.clone(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"email": "not-an-email", "password": "sturdy-pass-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_FIELD");
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn test_health_reports_skipped_stores() {
    let h = harness();
    let app = test::init_service(create_app(
        h.app_state.clone(),
        h.health_state.clone(),
        h.verifier.clone(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "signet-api");
    assert_eq!(body["checks"]["database"], "skipped");
    assert_eq!(body["checks"]["cache"], "skipped");
    assert!(body["version"].is_string());
}
