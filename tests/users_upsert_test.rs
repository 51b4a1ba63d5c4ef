// ABOUTME: Integration tests for the merge-on-login user upsert
// ABOUTME: Validates merge semantics, login-timestamp refresh, and owner bootstrap
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

mod common;

use chrono::{TimeZone, Utc};
use common::create_test_database;
use reach_portal_server::models::{UpsertUser, UserRole};

#[tokio::test]
async fn test_double_upsert_keeps_one_row_with_latest_name() {
    let db = create_test_database().await.unwrap();

    let mut first = UpsertUser::new("oid-42");
    first.name = Some("First Name".into());
    db.upsert_user(&first, None).await.unwrap();
    let created = db.get_user_by_open_id("oid-42").await.unwrap().unwrap();

    let mut second = UpsertUser::new("oid-42");
    second.name = Some("Second Name".into());
    db.upsert_user(&second, None).await.unwrap();

    let user = db.get_user_by_open_id("oid-42").await.unwrap().unwrap();
    // Same row, not a new one
    assert_eq!(user.id, created.id);
    assert_eq!(user.name.as_deref(), Some("Second Name"));
}

#[tokio::test]
async fn test_absent_fields_do_not_clobber_stored_values() {
    let db = create_test_database().await.unwrap();

    let mut first = UpsertUser::new("oid-1");
    first.name = Some("Ada".into());
    first.email = Some("ada@example.com".into());
    first.login_method = Some("google".into());
    db.upsert_user(&first, None).await.unwrap();

    // A bare login supplies nothing but the identity
    db.upsert_user(&UpsertUser::new("oid-1"), None).await.unwrap();

    let user = db.get_user_by_open_id("oid-1").await.unwrap().unwrap();
    assert_eq!(user.name.as_deref(), Some("Ada"));
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    assert_eq!(user.login_method.as_deref(), Some("google"));
}

#[tokio::test]
async fn test_last_signed_in_always_refreshed() {
    let db = create_test_database().await.unwrap();

    let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();

    let mut first = UpsertUser::new("oid-1");
    first.last_signed_in = Some(t1);
    db.upsert_user(&first, None).await.unwrap();

    let user = db.get_user_by_open_id("oid-1").await.unwrap().unwrap();
    assert_eq!(user.last_signed_in, t1);

    let mut second = UpsertUser::new("oid-1");
    second.last_signed_in = Some(t2);
    db.upsert_user(&second, None).await.unwrap();

    let user = db.get_user_by_open_id("oid-1").await.unwrap().unwrap();
    assert_eq!(user.last_signed_in, t2);
}

#[tokio::test]
async fn test_owner_bootstrap_applies_only_to_matching_identity() {
    let db = create_test_database().await.unwrap();

    db.upsert_user(&UpsertUser::new("the-owner"), Some("the-owner"))
        .await
        .unwrap();
    db.upsert_user(&UpsertUser::new("somebody-else"), Some("the-owner"))
        .await
        .unwrap();

    let owner = db.get_user_by_open_id("the-owner").await.unwrap().unwrap();
    let other = db.get_user_by_open_id("somebody-else").await.unwrap().unwrap();

    assert_eq!(owner.role, UserRole::Admin);
    assert_eq!(other.role, UserRole::User);
}

#[tokio::test]
async fn test_relogin_does_not_demote_elevated_role() {
    let db = create_test_database().await.unwrap();

    db.upsert_user(&UpsertUser::new("the-owner"), Some("the-owner"))
        .await
        .unwrap();

    // Later logins without the owner configuration keep the stored role
    db.upsert_user(&UpsertUser::new("the-owner"), None).await.unwrap();

    let owner = db.get_user_by_open_id("the-owner").await.unwrap().unwrap();
    assert_eq!(owner.role, UserRole::Admin);
}
