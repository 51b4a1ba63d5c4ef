// ABOUTME: Agency-curated public content: portfolio case studies and service catalogue
// ABOUTME: No owner on these entities; globally readable
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio case study shown on the public site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// Headline result, e.g. "+150% ROI"
    pub result_metric: Option<String>,
    pub result_description: Option<String>,
    pub client_name: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a portfolio case study
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPortfolioItem {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub result_metric: Option<String>,
    pub result_description: Option<String>,
    pub client_name: Option<String>,
    pub featured: bool,
}

/// A service offered by the agency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    /// URL-safe unique identifier
    pub slug: String,
    pub description: Option<String>,
    /// Icon class used by the front end
    pub icon: Option<String>,
    pub features: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a service catalogue entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub features: Option<Vec<String>>,
}
