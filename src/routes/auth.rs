// ABOUTME: Session-tier routes: login callback, identity lookup, and logout
// ABOUTME: Mints the session cookie after external login and clears it on logout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Session routes
//!
//! The external login provider redirects back with a verified subject id;
//! the callback upserts the user row (merge semantics) and sets the signed
//! session cookie. `/auth/me` reports the current identity, `/auth/logout`
//! clears the cookie.

use crate::{
    constants::SESSION_COOKIE,
    errors::AppError,
    models::{UpsertUser, User},
    resources::ServerResources,
    utils::cookies::{clear_session_cookie, get_cookie_value, session_cookie},
    validation::validate_required,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Completed-login payload from the external auth provider
#[derive(Debug, Deserialize)]
pub struct LoginCallbackRequest {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
}

/// Current-user information returned by session endpoints
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub last_signed_in: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            open_id: user.open_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            last_signed_in: user.last_signed_in.to_rfc3339(),
        }
    }
}

/// Logout acknowledgement
#[derive(Debug, Serialize)]
struct LogoutResponse {
    success: bool,
}

/// Session route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/callback", post(Self::handle_login_callback))
            .route("/auth/me", get(Self::handle_me))
            .route("/auth/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle a completed external login: upsert the user and set the
    /// session cookie
    async fn handle_login_callback(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginCallbackRequest>,
    ) -> Result<Response, AppError> {
        validate_required("open_id", &request.open_id)?;

        let upsert = UpsertUser {
            open_id: request.open_id.clone(),
            name: request.name,
            email: request.email,
            login_method: request.login_method,
            // The role is never caller-supplied; only the configured
            // owner identity is auto-elevated.
            role: None,
            last_signed_in: None,
        };

        resources
            .database
            .upsert_user(&upsert, resources.config.owner.open_id.as_deref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to upsert user on login");
                AppError::internal("Login could not be recorded")
            })?;

        let user = resources
            .database
            .get_user_by_open_id(&request.open_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::internal("Login could not be recorded"))?;

        let token = resources
            .auth_manager
            .generate_token(user.id, user.role)
            .map_err(|e| AppError::internal(format!("Failed to issue session: {e}")))?;

        tracing::info!(user_id = user.id, "User signed in");

        let cookie = session_cookie(
            &token,
            resources.auth_manager.session_max_age_secs(),
            resources.config.environment.is_production(),
        );

        let mut response = (StatusCode::OK, Json(UserInfo::from(&user))).into_response();
        response.headers_mut().insert(
            SET_COOKIE,
            HeaderValue::from_str(&cookie)
                .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?,
        );

        Ok(response)
    }

    /// Report the current identity, or null when not signed in
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Json<Option<UserInfo>> {
        let Some(token) = Self::session_token(&headers) else {
            return Json(None);
        };

        let Ok(auth) = resources.auth_manager.validate_token(&token) else {
            return Json(None);
        };

        match resources.database.get_user(auth.user_id).await {
            Ok(Some(user)) => Json(Some(UserInfo::from(&user))),
            _ => Json(None),
        }
    }

    /// Clear the session cookie
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let cookie = clear_session_cookie(resources.config.environment.is_production());

        let mut response =
            (StatusCode::OK, Json(LogoutResponse { success: true })).into_response();
        response.headers_mut().insert(
            SET_COOKIE,
            HeaderValue::from_str(&cookie)
                .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?,
        );

        Ok(response)
    }

    /// Read the session token from the Authorization header or the cookie
    fn session_token(headers: &HeaderMap) -> Option<String> {
        if let Some(header) = headers.get("authorization").and_then(|h| h.to_str().ok()) {
            if let Ok(token) = crate::utils::auth::extract_bearer_token(header) {
                return Some(token.to_owned());
            }
        }
        get_cookie_value(headers, SESSION_COOKIE)
    }
}
