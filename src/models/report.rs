// ABOUTME: Monthly performance reports prepared by the agency for clients
// ABOUTME: Report struct with free-form metric map, and insert payload
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A performance report belonging to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub client_id: i64,
    pub title: String,
    /// Reporting month in `YYYY-MM` format
    pub month: Option<String>,
    /// Arbitrary metric name to numeric value mapping
    pub metrics: HashMap<String, f64>,
    pub summary: Option<String>,
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub client_id: i64,
    pub title: String,
    pub month: Option<String>,
    pub metrics: HashMap<String, f64>,
    pub summary: Option<String>,
    pub attachment_url: Option<String>,
}
