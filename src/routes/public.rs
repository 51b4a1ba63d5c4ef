// ABOUTME: Public-tier routes: content listing and anonymous form submissions
// ABOUTME: No identity required; submissions are validated before any data access
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Public routes
//!
//! Read-only content listing (services, portfolio) and the two public
//! write submissions (contact, budget request). Server-side validation
//! runs before any row is inserted.

use crate::{
    constants::limits,
    errors::AppError,
    models::{NewBudget, NewContact},
    resources::ServerResources,
    validation::{validate_email, validate_min_length, validate_required},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for portfolio listing
#[derive(Debug, Deserialize)]
struct PortfolioQuery {
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    limit: Option<i64>,
}

/// Contact form submission
#[derive(Debug, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
}

/// Budget request submission
#[derive(Debug, Deserialize)]
pub struct BudgetSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub services: Vec<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub description: Option<String>,
}

/// Submission acknowledgement
#[derive(Debug, Serialize)]
struct SubmissionResponse {
    success: bool,
}

/// Public route handlers
pub struct PublicRoutes;

impl PublicRoutes {
    /// Create all public routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/services", get(Self::handle_list_services))
            .route("/api/services/:slug", get(Self::handle_get_service))
            .route("/api/portfolio", get(Self::handle_portfolio))
            .route("/api/contact", post(Self::handle_submit_contact))
            .route("/api/budgets", post(Self::handle_submit_budget))
            .with_state(resources)
    }

    /// List the full service catalogue
    async fn handle_list_services(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let services = resources
            .database
            .get_all_services()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(services)).into_response())
    }

    /// Get a single service by slug; null when absent
    async fn handle_get_service(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Response, AppError> {
        let service = resources
            .database
            .get_service_by_slug(&slug)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(service)).into_response())
    }

    /// List portfolio case studies, optionally only featured ones
    async fn handle_portfolio(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<PortfolioQuery>,
    ) -> Result<Response, AppError> {
        let items = if params.featured.unwrap_or(false) {
            let limit = params
                .limit
                .unwrap_or(limits::DEFAULT_FEATURED_PORTFOLIO)
                .clamp(1, limits::MAX_PORTFOLIO_LIMIT);
            resources.database.get_featured_portfolio_items(limit).await
        } else {
            resources.database.get_all_portfolio_items().await
        }
        .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// Handle a contact form submission
    async fn handle_submit_contact(
        State(resources): State<Arc<ServerResources>>,
        Json(submission): Json<ContactSubmission>,
    ) -> Result<Response, AppError> {
        validate_required("name", &submission.name)?;
        validate_email(&submission.email)?;
        validate_min_length("message", &submission.message, limits::MIN_CONTACT_MESSAGE_LEN)?;

        resources
            .database
            .create_contact(&NewContact {
                name: submission.name,
                email: submission.email,
                phone: submission.phone,
                company: submission.company,
                message: submission.message,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store contact submission");
                AppError::internal("Database unavailable")
            })?;

        Ok((StatusCode::CREATED, Json(SubmissionResponse { success: true })).into_response())
    }

    /// Handle a budget request submission
    async fn handle_submit_budget(
        State(resources): State<Arc<ServerResources>>,
        Json(submission): Json<BudgetSubmission>,
    ) -> Result<Response, AppError> {
        validate_required("name", &submission.name)?;
        validate_email(&submission.email)?;
        validate_required("company", &submission.company)?;

        resources
            .database
            .create_budget(&NewBudget {
                name: submission.name,
                email: submission.email,
                company: submission.company,
                services: submission.services,
                budget: submission.budget,
                timeline: submission.timeline,
                description: submission.description,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store budget submission");
                AppError::internal("Database unavailable")
            })?;

        Ok((StatusCode::CREATED, Json(SubmissionResponse { success: true })).into_response())
    }
}
