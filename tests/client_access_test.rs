// ABOUTME: Integration tests for the protected client-portal tier
// ABOUTME: Ownership enforcement: non-owners get forbidden, never the data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

mod common;

use axum::http::StatusCode;
use common::{create_test_resources, create_test_user, error_code, get_json, send_json, session_for, test_router};
use reach_portal_server::models::{NewReport, UserRole};
use serde_json::json;
use std::collections::HashMap;

#[tokio::test]
async fn test_unauthenticated_calls_are_rejected() {
    let resources = create_test_resources().await.unwrap();
    let router = test_router(&resources);

    let (status, body) = get_json(&router, "/api/clients", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "AUTH_REQUIRED");

    let (status, _) = get_json(&router, "/api/clients", Some("garbage-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_owner_can_create_and_read_client() {
    let resources = create_test_resources().await.unwrap();
    let owner = create_test_user(&resources, "owner-1", UserRole::Client).await.unwrap();
    let token = session_for(&resources, &owner);
    let router = test_router(&resources);

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/clients",
        Some(&token),
        &json!({ "company_name": "Acme", "industry": "retail" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let client_id = body["id"].as_i64().unwrap();

    let (status, body) = get_json(&router, "/api/clients", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get_json(&router, &format!("/api/clients/{client_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company_name"], "Acme");
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_non_owner_gets_forbidden_never_the_data() {
    let resources = create_test_resources().await.unwrap();
    let owner = create_test_user(&resources, "owner-1", UserRole::Client).await.unwrap();
    let intruder = create_test_user(&resources, "intruder", UserRole::Client).await.unwrap();
    let owner_token = session_for(&resources, &owner);
    let intruder_token = session_for(&resources, &intruder);
    let router = test_router(&resources);

    let (_, body) = send_json(
        &router,
        "POST",
        "/api/clients",
        Some(&owner_token),
        &json!({ "company_name": "Acme" }),
    )
    .await;
    let client_id = body["id"].as_i64().unwrap();

    for uri in [
        format!("/api/clients/{client_id}"),
        format!("/api/clients/{client_id}/messages"),
        format!("/api/clients/{client_id}/reports"),
        format!("/api/clients/{client_id}/budgets"),
    ] {
        let (status, body) = get_json(&router, &uri, Some(&intruder_token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "leaked: {uri}");
        assert_eq!(error_code(&body), "FORBIDDEN");
        // The generic error carries no client fields
        assert!(body.get("company_name").is_none());
    }

    // Writing into a foreign thread is forbidden too
    let (status, _) = send_json(
        &router,
        "POST",
        &format!("/api/clients/{client_id}/messages"),
        Some(&intruder_token),
        &json!({ "content": "let me in" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(resources
        .database
        .get_messages_by_client_id(client_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_absent_client_is_indistinguishable_from_foreign() {
    let resources = create_test_resources().await.unwrap();
    let user = create_test_user(&resources, "user-1", UserRole::Client).await.unwrap();
    let token = session_for(&resources, &user);
    let router = test_router(&resources);

    let (status, body) = get_json(&router, "/api/clients/9999", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");
}

#[tokio::test]
async fn test_message_thread_round_trip() {
    let resources = create_test_resources().await.unwrap();
    let owner = create_test_user(&resources, "owner-1", UserRole::Client).await.unwrap();
    let token = session_for(&resources, &owner);
    let router = test_router(&resources);

    let (_, body) = send_json(
        &router,
        "POST",
        "/api/clients",
        Some(&token),
        &json!({ "company_name": "Acme" }),
    )
    .await;
    let client_id = body["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &router,
        "POST",
        &format!("/api/clients/{client_id}/messages"),
        Some(&token),
        &json!({ "subject": "Kickoff", "content": "When do we start?" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Empty content is rejected before the ownership check even runs
    let (status, body) = send_json(
        &router,
        "POST",
        &format!("/api/clients/{client_id}/messages"),
        Some(&token),
        &json!({ "content": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "MISSING_REQUIRED_FIELD");

    let (status, body) = get_json(&router, &format!("/api/clients/{client_id}/messages"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender_type"], "client");
    assert_eq!(messages[0]["is_read"], false);
}

#[tokio::test]
async fn test_owner_reads_reports() {
    let resources = create_test_resources().await.unwrap();
    let owner = create_test_user(&resources, "owner-1", UserRole::Client).await.unwrap();
    let token = session_for(&resources, &owner);
    let router = test_router(&resources);

    let (_, body) = send_json(
        &router,
        "POST",
        "/api/clients",
        Some(&token),
        &json!({ "company_name": "Acme" }),
    )
    .await;
    let client_id = body["id"].as_i64().unwrap();

    let mut metrics = HashMap::new();
    metrics.insert("impressions".to_string(), 125_000.0);
    resources
        .database
        .create_report(&NewReport {
            client_id,
            title: "March performance".into(),
            month: Some("2025-03".into()),
            metrics,
            summary: None,
            attachment_url: None,
        })
        .await
        .unwrap();

    let (status, body) = get_json(&router, &format!("/api/clients/{client_id}/reports"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let reports = body.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["metrics"]["impressions"], 125_000.0);
}
