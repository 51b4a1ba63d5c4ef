// ABOUTME: Main library entry point for the Reach+ Agency portal backend
// ABOUTME: Exposes the public API surface, data access layer, and route modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

#![deny(unsafe_code)]

//! # Reach+ Portal Server
//!
//! Backend for the Reach+ marketing-agency website and client portal.
//! Serves the public landing surface (service catalogue, portfolio,
//! contact and budget-request submissions) and an authenticated client
//! dashboard (clients, messages, reports) with an admin tier for
//! inbound-inquiry triage.
//!
//! ## Architecture
//!
//! - **Models**: entity definitions mirroring the relational schema
//! - **Database**: typed query functions, one statement per call
//! - **Auth**: signed session tokens carried in a cookie
//! - **Routes**: HTTP endpoints grouped by trust tier
//!   (public / protected / admin / session)
//! - **Config**: environment-driven server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use reach_portal_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Reach+ portal configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Session token issuance and validation
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Data access layer over the relational schema
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Common data models for portal entities
pub mod models;

/// Centralized resource container for dependency injection
pub mod resources;

/// HTTP routes grouped by trust tier
pub mod routes;

/// HTTP server assembly and startup
pub mod server;

/// Utility functions and helpers
pub mod utils;

/// Input validation applied before any data access
pub mod validation;
