// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, resource, and request helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency
#![allow(dead_code)]

//! Shared test utilities for `reach_portal_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use reach_portal_server::{
    auth::{generate_session_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    models::{UpsertUser, User, UserRole},
    resources::ServerResources,
    server::PortalServer,
};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Create a test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(&generate_session_secret(), 24)
}

/// Create test `ServerResources` with all components initialized
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with_config(ServerConfig::default()).await
}

/// Create test `ServerResources` over a custom configuration
pub async fn create_test_resources_with_config(
    config: ServerConfig,
) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let auth_manager = create_test_auth_manager();

    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    )))
}

/// Build the full application router over the given resources
pub fn test_router(resources: &Arc<ServerResources>) -> Router {
    PortalServer::new(resources.clone()).router()
}

/// Create a user with the given external identity and role
pub async fn create_test_user(
    resources: &Arc<ServerResources>,
    open_id: &str,
    role: UserRole,
) -> Result<User> {
    let mut upsert = UpsertUser::new(open_id);
    upsert.name = Some(format!("{open_id} name"));
    upsert.email = Some(format!("{open_id}@example.com"));
    upsert.role = Some(role);

    resources.database.upsert_user(&upsert, None).await?;
    let user = resources
        .database
        .get_user_by_open_id(open_id)
        .await?
        .expect("user just upserted");
    Ok(user)
}

/// Mint a session token for a user
pub fn session_for(resources: &Arc<ServerResources>, user: &User) -> String {
    resources
        .auth_manager
        .generate_token(user.id, user.role)
        .expect("token generation")
}

/// Issue a GET request against the router, optionally authenticated
pub async fn get_json(
    router: &Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).expect("request");

    send(router, request).await
}

/// Issue a JSON request with a body against the router
pub async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");

    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router response");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Extract the error code tag from an error response body
pub fn error_code(body: &serde_json::Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
