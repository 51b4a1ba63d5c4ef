// ABOUTME: Admin-tier routes for inbound-inquiry triage
// ABOUTME: Role is re-checked against the database on every call
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Admin routes
//!
//! Unrestricted read access to contact inquiries and budget requests plus
//! their status mutations. The admin role is re-fetched from the database
//! on every call; no authorization decision is cached.

use crate::{
    auth::{AuthResult, SessionValidationError},
    constants::SESSION_COOKIE,
    errors::AppError,
    models::{Budget, BudgetStatus, Contact, ContactStatus},
    resources::ServerResources,
    utils::cookies::get_cookie_value,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for the contact inquiry list
#[derive(Debug, Serialize)]
struct ContactsResponse {
    contacts: Vec<Contact>,
    total_count: usize,
}

/// Response for the budget request list
#[derive(Debug, Serialize)]
struct BudgetsResponse {
    budgets: Vec<Budget>,
    total_count: usize,
}

/// Contact status mutation payload
#[derive(Debug, Deserialize)]
pub struct UpdateContactStatusRequest {
    pub status: ContactStatus,
}

/// Budget status mutation payload
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetStatusRequest {
    pub status: BudgetStatus,
    pub quoted_price: Option<f64>,
}

/// Mutation acknowledgement
#[derive(Debug, Serialize)]
struct UpdateResponse {
    success: bool,
}

/// Admin route handlers
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/admin/contacts", get(Self::handle_list_contacts))
            .route("/api/admin/contacts/:id", get(Self::handle_get_contact))
            .route(
                "/api/admin/contacts/:id/status",
                put(Self::handle_update_contact_status),
            )
            .route("/api/admin/budgets", get(Self::handle_list_budgets))
            .route(
                "/api/admin/budgets/:id/status",
                put(Self::handle_update_budget_status),
            )
            .with_state(resources)
    }

    /// Authenticate the caller and require the admin role.
    ///
    /// The role comes from the user row, not the session claims, so a
    /// demotion takes effect on the next call.
    async fn authenticate_admin(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        // Try Authorization header first, then fall back to the session cookie
        let token = if let Some(header) =
            headers.get("authorization").and_then(|h| h.to_str().ok())
        {
            crate::utils::auth::extract_bearer_token(header)
                .map_err(|e| AppError::auth_invalid(e.to_string()))?
                .to_owned()
        } else if let Some(token) = get_cookie_value(headers, SESSION_COOKIE) {
            token
        } else {
            return Err(AppError::auth_required());
        };

        let auth = resources
            .auth_manager
            .validate_token(&token)
            .map_err(|e| match e {
                SessionValidationError::TokenExpired { .. } => AppError::auth_expired(),
                _ => AppError::auth_invalid(e.to_string()),
            })?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::auth_invalid("Unknown user"))?;

        if !user.role.is_admin() {
            return Err(AppError::forbidden());
        }

        Ok(auth)
    }

    /// List all contact inquiries
    async fn handle_list_contacts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate_admin(&headers, &resources).await?;

        tracing::info!(user_id = auth.user_id, "Admin listing contact inquiries");

        let contacts = resources
            .database
            .get_all_contacts()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let total_count = contacts.len();

        Ok((
            StatusCode::OK,
            Json(ContactsResponse {
                contacts,
                total_count,
            }),
        )
            .into_response())
    }

    /// Get a single contact inquiry
    async fn handle_get_contact(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        Self::authenticate_admin(&headers, &resources).await?;

        let contact = resources
            .database
            .get_contact_by_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Contact"))?;

        Ok((StatusCode::OK, Json(contact)).into_response())
    }

    /// Update a contact inquiry's triage status
    async fn handle_update_contact_status(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
        Json(request): Json<UpdateContactStatusRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate_admin(&headers, &resources).await?;

        let updated = resources
            .database
            .update_contact_status(id, request.status)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to update contact status");
                AppError::internal("Database unavailable")
            })?;

        if !updated {
            return Err(AppError::not_found("Contact"));
        }

        tracing::info!(
            user_id = auth.user_id,
            contact_id = id,
            status = %request.status,
            "Contact status updated"
        );

        Ok((StatusCode::OK, Json(UpdateResponse { success: true })).into_response())
    }

    /// List all budget requests
    async fn handle_list_budgets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate_admin(&headers, &resources).await?;

        tracing::info!(user_id = auth.user_id, "Admin listing budget requests");

        let budgets = resources
            .database
            .get_all_budgets()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let total_count = budgets.len();

        Ok((
            StatusCode::OK,
            Json(BudgetsResponse {
                budgets,
                total_count,
            }),
        )
            .into_response())
    }

    /// Update a budget request's status, optionally quoting a price
    async fn handle_update_budget_status(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
        Json(request): Json<UpdateBudgetStatusRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate_admin(&headers, &resources).await?;

        let updated = resources
            .database
            .update_budget_status(id, request.status, request.quoted_price)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to update budget status");
                AppError::internal("Database unavailable")
            })?;

        if !updated {
            return Err(AppError::not_found("Budget"));
        }

        tracing::info!(
            user_id = auth.user_id,
            budget_id = id,
            status = %request.status,
            "Budget status updated"
        );

        Ok((StatusCode::OK, Json(UpdateResponse { success: true })).into_response())
    }
}
