// ABOUTME: HTTP server assembly and startup for the portal
// ABOUTME: Merges tier routers, applies middleware, and serves with graceful shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! HTTP server assembly
//!
//! Builds the full router from the tier modules, applies request tracing
//! and CORS, and runs until shutdown. The database pool is closed on the
//! way out.

use crate::resources::ServerResources;
use crate::routes::{AdminRoutes, AuthRoutes, ClientPortalRoutes, HealthRoutes, PublicRoutes};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Portal HTTP server
pub struct PortalServer {
    resources: Arc<ServerResources>,
}

impl PortalServer {
    /// Create a new server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        // Browsers talk to the API from the marketing site during
        // development; production serves both from one origin.
        let cors = if self.resources.config.environment.is_development() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };

        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(PublicRoutes::routes(self.resources.clone()))
            .merge(ClientPortalRoutes::routes(self.resources.clone()))
            .merge(AdminRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Run the server until interrupted
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// fails while running
    pub async fn run(self) -> Result<()> {
        let port = self.resources.config.http_port;
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

        info!("HTTP server listening on http://0.0.0.0:{port}");

        let resources = self.resources.clone();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
            })
            .await?;

        // Defined shutdown for the one shared resource
        resources.database.close().await;
        info!("Database pool closed");

        Ok(())
    }
}
