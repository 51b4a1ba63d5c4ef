// ABOUTME: Integration tests for the session tier routes
// ABOUTME: Login callback, identity lookup, logout, and the owner bootstrap
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_resources, create_test_resources_with_config, test_router};
use reach_portal_server::config::environment::ServerConfig;
use serde_json::json;
use tower::ServiceExt;

/// Drive the login callback directly so the raw response headers are visible
async fn login(
    router: &axum::Router,
    payload: &serde_json::Value,
) -> (StatusCode, Option<String>, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/callback")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, cookie, body)
}

#[tokio::test]
async fn test_login_callback_creates_user_and_sets_cookie() {
    let resources = create_test_resources().await.unwrap();
    let router = test_router(&resources);

    let (status, cookie, body) = login(
        &router,
        &json!({ "open_id": "oid-1", "name": "Ada", "email": "ada@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["role"], "user");

    let cookie = cookie.expect("session cookie set");
    assert!(cookie.starts_with("reach_session="));
    assert!(cookie.contains("HttpOnly"));

    let user = resources
        .database
        .get_user_by_open_id("oid-1")
        .await
        .unwrap()
        .expect("user row created on first login");
    assert_eq!(user.name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_login_callback_requires_open_id() {
    let resources = create_test_resources().await.unwrap();
    let router = test_router(&resources);

    let (status, _, _) = login(&router, &json!({ "open_id": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_identity_is_elevated_through_the_callback() {
    let mut config = ServerConfig::default();
    config.owner.open_id = Some("the-owner".into());
    let resources = create_test_resources_with_config(config).await.unwrap();
    let router = test_router(&resources);

    let (_, _, body) = login(&router, &json!({ "open_id": "the-owner" })).await;
    assert_eq!(body["role"], "admin");

    let (_, _, body) = login(&router, &json!({ "open_id": "visitor" })).await;
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_me_reflects_the_session_cookie() {
    let resources = create_test_resources().await.unwrap();
    let router = test_router(&resources);

    let (_, cookie, _) = login(&router, &json!({ "open_id": "oid-1", "name": "Ada" })).await;
    let cookie = cookie.unwrap();
    // Send back only the name=value pair, as a browser would
    let pair = cookie.split(';').next().unwrap().to_string();

    let request = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header("cookie", &pair)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["name"], "Ada");

    // Without a session, me is null rather than an error
    let request = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_logout_clears_the_cookie() {
    let resources = create_test_resources().await.unwrap();
    let router = test_router(&resources);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.starts_with("reach_session=;"));
}
