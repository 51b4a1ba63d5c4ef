// ABOUTME: Server binary for the Reach+ portal backend
// ABOUTME: Loads configuration, constructs resources, and serves the HTTP API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! # Reach+ Portal Server Binary
//!
//! Starts the marketing-site backend and client-portal API with explicit
//! database construction and session-secret bootstrap.

use anyhow::Result;
use clap::Parser;
use reach_portal_server::{
    auth::{generate_session_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    resources::ServerResources,
    server::PortalServer,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "reach-portal-server")]
#[command(about = "Reach+ Agency - marketing site backend and client portal API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Reach+ portal server");
    info!("{}", config.summary());

    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());

    // Explicit database construction; no lazy global connection state
    let database = Database::new(&database_url).await?;
    info!("Database connected and migrated");

    // Session secret from the environment, or generated for this run
    let secret = match &config.auth.session_secret {
        Some(secret) => secret.clone().into_bytes(),
        None => {
            warn!("SESSION_SECRET not set; sessions will not survive a restart");
            generate_session_secret().to_vec()
        }
    };
    let auth_manager = AuthManager::new(&secret, config.auth.session_expiry_hours);

    let resources = ServerResources::builder()
        .with_database(database)
        .with_auth_manager(auth_manager)
        .with_config(Arc::new(config))
        .build_arc()
        .map_err(|e| anyhow::anyhow!("Failed to build server resources: {e}"))?;

    PortalServer::new(resources).run().await
}
