// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_names};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" {
                Self::Memory
            } else {
                Self::SQLite {
                    path: PathBuf::from(path_str),
                }
            }
        } else {
            // Fallback: treat as SQLite file path
            Self::SQLite {
                path: PathBuf::from(s),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/portal.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session/auth configuration
    pub auth: AuthConfig,
    /// Trust bootstrap for the agency owner identity
    pub owner: OwnerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or in-memory)
    pub url: DatabaseUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session signing secret; generated at startup when absent
    pub session_secret: Option<String>,
    /// Session expiry time in hours
    pub session_expiry_hours: i64,
}

/// The external identity automatically elevated to admin role on login.
/// Elevation applies only when the upsert supplies no explicit role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerConfig {
    pub open_id: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: env_var_or(env_names::HTTP_PORT, &defaults::HTTP_PORT.to_string())?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or(env_names::LOG_LEVEL, "info")?),
            environment: Environment::from_str_or_default(&env_var_or(
                env_names::ENVIRONMENT,
                "development",
            )?),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    env_names::DATABASE_URL,
                    defaults::DATABASE_URL,
                )?),
            },
            auth: AuthConfig {
                session_secret: env::var(env_names::SESSION_SECRET).ok(),
                session_expiry_hours: env_var_or(
                    env_names::SESSION_EXPIRY_HOURS,
                    &defaults::SESSION_EXPIRY_HOURS.to_string(),
                )?
                .parse()
                .context("Invalid SESSION_EXPIRY_HOURS value")?,
            },
            owner: OwnerConfig {
                open_id: env::var(env_names::OWNER_OPEN_ID).ok(),
            },
        };

        Ok(config)
    }

    /// One-line configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} env={} log={} db={} owner_bootstrap={}",
            self.http_port,
            self.environment,
            self.log_level,
            self.database.url,
            self.owner.open_id.is_some(),
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            log_level: LogLevel::Info,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                session_secret: None,
                session_expiry_hours: defaults::SESSION_EXPIRY_HOURS,
            },
            owner: OwnerConfig { open_id: None },
        }
    }
}

/// Read an environment variable, falling back to a default
fn env_var_or(key: &str, default: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e).with_context(|| format!("Failed to read environment variable {key}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parse() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());

        let url = DatabaseUrl::parse_url("sqlite:./data/portal.db");
        assert_eq!(url.to_connection_string(), "sqlite:./data/portal.db");

        // Bare paths fall back to SQLite
        let url = DatabaseUrl::parse_url("./portal.db");
        assert_eq!(url.to_connection_string(), "sqlite:./portal.db");
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("nonsense"),
            Environment::Development
        );
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }
}
