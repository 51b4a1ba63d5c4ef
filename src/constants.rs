// ABOUTME: Application constants, environment variable names, and default values
// ABOUTME: Single place for limits and defaults shared across config, routes, and tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Application constants and configuration values

/// Environment variable names
pub mod env_names {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Log level (error, warn, info, debug, trace)
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Database URL (SQLite path or `sqlite::memory:`)
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Session signing secret (hex or raw string)
    pub const SESSION_SECRET: &str = "SESSION_SECRET";
    /// Session expiry in hours
    pub const SESSION_EXPIRY_HOURS: &str = "SESSION_EXPIRY_HOURS";
    /// External identity auto-elevated to admin on login
    pub const OWNER_OPEN_ID: &str = "OWNER_OPEN_ID";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/portal.db";
    /// Default session lifetime
    pub const SESSION_EXPIRY_HOURS: i64 = 24;
}

/// Validation and query limits
pub mod limits {
    /// Minimum length for a contact-form message
    pub const MIN_CONTACT_MESSAGE_LEN: usize = 10;
    /// Default number of featured portfolio items returned
    pub const DEFAULT_FEATURED_PORTFOLIO: i64 = 3;
    /// Hard cap on portfolio listing size
    pub const MAX_PORTFOLIO_LIMIT: i64 = 100;
}

/// Session cookie name carried by the browser
pub const SESSION_COOKIE: &str = "reach_session";

/// Service name used in logging and health output
pub const SERVICE_NAME: &str = "reach-portal-server";
