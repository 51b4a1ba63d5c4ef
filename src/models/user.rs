// ABOUTME: User models for the external-identity login flow
// ABOUTME: User, UserRole, and the merge-on-login upsert payload
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Role determining a user's trust tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular visitor account
    #[default]
    User,
    /// Agency staff with access to inbound inquiries
    Admin,
    /// Client-company account
    Client,
}

impl UserRole {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }

    /// Check whether this role carries admin privileges
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            _ => Err(AppError::invalid_input(format!("Invalid user role: {s}"))),
        }
    }
}

/// Represents a user account bound to an external login identity
///
/// Users are created on first successful external login and merged (never
/// replaced) on every subsequent login. The `open_id` is the durable key
/// returned by the third-party login provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Surrogate identifier
    pub id: i64,
    /// External auth subject id, unique per user
    pub open_id: String,
    /// Display name
    pub name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Login method reported by the provider
    pub login_method: Option<String>,
    /// Trust role
    pub role: UserRole,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// Last successful login
    pub last_signed_in: DateTime<Utc>,
}

/// Payload for the merge-on-conflict user upsert
///
/// Absent fields leave the stored row untouched; `last_signed_in` is always
/// refreshed (to the supplied value, or to now).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertUser {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Option<UserRole>,
    pub last_signed_in: Option<DateTime<Utc>>,
}

impl UpsertUser {
    /// Upsert payload carrying only the external identity
    #[must_use]
    pub fn new(open_id: impl Into<String>) -> Self {
        Self {
            open_id: open_id.into(),
            ..Self::default()
        }
    }
}
