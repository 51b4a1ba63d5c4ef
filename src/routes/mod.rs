// ABOUTME: Route module organization for portal HTTP endpoints
// ABOUTME: Routes are grouped by trust tier with thin handlers delegating to the data layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Route modules for the portal server
//!
//! Each module owns one trust tier and contains only route definitions and
//! thin handler functions. Authorization is enforced per call; no decision
//! is cached across requests.

/// Admin tier: inbound-inquiry triage (contacts, budgets)
pub mod admin;
/// Session tier: login callback, identity lookup, logout
pub mod auth;
/// Protected tier: caller-scoped client data (clients, messages, reports)
pub mod client;
/// Health check and system status routes
pub mod health;
/// Public tier: content listing and form submissions
pub mod public;

pub use admin::AdminRoutes;
pub use auth::AuthRoutes;
pub use client::ClientPortalRoutes;
pub use health::HealthRoutes;
pub use public::PublicRoutes;
