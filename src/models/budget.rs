// ABOUTME: Project-quote (budget) requests submitted from the public site
// ABOUTME: Budget struct, quote lifecycle enum, and insert payload
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Lifecycle of a quote request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    #[default]
    Pending,
    Quoted,
    Accepted,
    Rejected,
}

impl BudgetStatus {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Quoted => "quoted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for BudgetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "quoted" => Ok(Self::Quoted),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::invalid_input(format!(
                "Invalid budget status: {s}"
            ))),
        }
    }
}

/// An inbound project-quote request. Publicly writable; readable and
/// updatable only by admins. Optionally linked to a client later.
///
/// `quoted_price` and `quoted_at` are set together when the status moves
/// to `quoted` with a price: both present or both absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub client_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub company: String,
    /// Services the requester is interested in
    pub services: Vec<String>,
    /// Budget range label, e.g. "5000-10000"
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub description: Option<String>,
    pub status: BudgetStatus,
    pub created_at: DateTime<Utc>,
    pub quoted_at: Option<DateTime<Utc>>,
    pub quoted_price: Option<f64>,
}

/// Insert payload for a budget submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub name: String,
    pub email: String,
    pub company: String,
    pub services: Vec<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub description: Option<String>,
}
