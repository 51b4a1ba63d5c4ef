// ABOUTME: Protected-tier routes: caller-scoped client data
// ABOUTME: Every access re-runs the ownership check against the referenced client
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Client portal routes
//!
//! All handlers require a valid session. Every client-scoped call fetches
//! the referenced client and verifies that its owning user equals the
//! caller; a mismatch (or an absent client) yields a generic forbidden
//! error, never the data. The check is re-run independently on every call.

use crate::{
    auth::{AuthResult, SessionValidationError},
    constants::SESSION_COOKIE,
    errors::AppError,
    models::{Client, NewClient, NewMessage, SenderType},
    resources::ServerResources,
    utils::cookies::get_cookie_value,
    validation::validate_required,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// New client payload
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// New message payload
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub subject: Option<String>,
    pub content: String,
}

/// Creation acknowledgement with the new row id
#[derive(Debug, Serialize)]
struct CreatedResponse {
    success: bool,
    id: i64,
}

/// Client portal route handlers
pub struct ClientPortalRoutes;

impl ClientPortalRoutes {
    /// Create all protected client-portal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/clients",
                get(Self::handle_my_clients).post(Self::handle_create_client),
            )
            .route("/api/clients/:id", get(Self::handle_get_client))
            .route(
                "/api/clients/:id/messages",
                get(Self::handle_get_messages).post(Self::handle_send_message),
            )
            .route("/api/clients/:id/reports", get(Self::handle_get_reports))
            .route("/api/clients/:id/budgets", get(Self::handle_get_budgets))
            .with_state(resources)
    }

    /// Extract and validate the caller's session
    fn authenticate(
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

        resources
            .auth_manager
            .validate_token(&token)
            .map_err(|e| match e {
                SessionValidationError::TokenExpired { .. } => AppError::auth_expired(),
                _ => AppError::auth_invalid(e.to_string()),
            })
    }

    /// Fetch the referenced client and verify ownership.
    ///
    /// An absent client and a foreign client are indistinguishable to the
    /// caller: both fail with the generic forbidden error.
    async fn authorize_client_access(
        resources: &Arc<ServerResources>,
        client_id: i64,
        user_id: i64,
    ) -> Result<Client, AppError> {
        let client = resources
            .database
            .get_client_by_id(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        match client {
            Some(client) if client.user_id == user_id => Ok(client),
            _ => Err(AppError::forbidden()),
        }
    }

    /// List the caller's own clients
    async fn handle_my_clients(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let clients = resources
            .database
            .get_clients_by_user_id(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(clients)).into_response())
    }

    /// Get one client, enforcing ownership
    async fn handle_get_client(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        let client = Self::authorize_client_access(&resources, id, auth.user_id).await?;

        Ok((StatusCode::OK, Json(client)).into_response())
    }

    /// Create a client owned by the caller
    async fn handle_create_client(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateClientRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        validate_required("company_name", &request.company_name)?;

        let id = resources
            .database
            .create_client(&NewClient {
                user_id: auth.user_id,
                company_name: request.company_name,
                industry: request.industry,
                website: request.website,
                phone: request.phone,
                address: request.address,
                description: request.description,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create client");
                AppError::internal("Database unavailable")
            })?;

        Ok((StatusCode::CREATED, Json(CreatedResponse { success: true, id })).into_response())
    }

    /// List a client's messages, enforcing ownership
    async fn handle_get_messages(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::authorize_client_access(&resources, id, auth.user_id).await?;

        let messages = resources
            .database
            .get_messages_by_client_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(messages)).into_response())
    }

    /// Send a message into a client's thread, enforcing ownership
    async fn handle_send_message(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
        Json(request): Json<SendMessageRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        validate_required("content", &request.content)?;
        Self::authorize_client_access(&resources, id, auth.user_id).await?;

        let message_id = resources
            .database
            .create_message(&NewMessage {
                client_id: id,
                sender_id: auth.user_id,
                sender_type: SenderType::Client,
                subject: request.subject,
                content: request.content,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store message");
                AppError::internal("Database unavailable")
            })?;

        Ok((
            StatusCode::CREATED,
            Json(CreatedResponse {
                success: true,
                id: message_id,
            }),
        )
            .into_response())
    }

    /// List a client's reports, enforcing ownership
    async fn handle_get_reports(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::authorize_client_access(&resources, id, auth.user_id).await?;

        let reports = resources
            .database
            .get_reports_by_client_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(reports)).into_response())
    }

    /// List budget requests linked to a client, enforcing ownership
    async fn handle_get_budgets(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::authorize_client_access(&resources, id, auth.user_id).await?;

        let budgets = resources
            .database
            .get_budgets_by_client_id(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(budgets)).into_response())
    }
}
