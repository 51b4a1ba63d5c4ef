// ABOUTME: Agency-curated content database operations
// ABOUTME: Portfolio and service catalogue queries plus curation inserts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{NewPortfolioItem, NewService, PortfolioItem, Service};
use anyhow::{Context, Result};
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the portfolio and services tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_content(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS portfolio_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                category TEXT,
                image_url TEXT,
                result_metric TEXT,
                result_description TEXT,
                client_name TEXT,
                featured BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                description TEXT,
                icon TEXT,
                features TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a portfolio case study (curation path)
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_portfolio_item(&self, item: &NewPortfolioItem) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO portfolio_items
                (title, description, category, image_url, result_metric,
                 result_description, client_name, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.category)
        .bind(&item.image_url)
        .bind(&item.result_metric)
        .bind(&item.result_description)
        .bind(&item.client_name)
        .bind(item.featured)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a service catalogue entry (curation path)
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_service(&self, service: &NewService) -> Result<i64> {
        let features = service
            .features
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to serialize service features")?;

        let result = sqlx::query(
            r"
            INSERT INTO services (name, slug, description, icon, features)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&service.name)
        .bind(&service.slug)
        .bind(&service.description)
        .bind(&service.icon)
        .bind(features)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all portfolio case studies, newest first
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_all_portfolio_items(&self) -> Result<Vec<PortfolioItem>> {
        let rows = match sqlx::query(
            r"
            SELECT id, title, description, category, image_url, result_metric,
                   result_description, client_name, featured, created_at
            FROM portfolio_items ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Portfolio listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_portfolio_item).collect()
    }

    /// List featured portfolio case studies, up to `limit`
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_featured_portfolio_items(&self, limit: i64) -> Result<Vec<PortfolioItem>> {
        let rows = match sqlx::query(
            r"
            SELECT id, title, description, category, image_url, result_metric,
                   result_description, client_name, featured, created_at
            FROM portfolio_items WHERE featured = 1 LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Portfolio listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_portfolio_item).collect()
    }

    /// List all services
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_all_services(&self) -> Result<Vec<Service>> {
        let rows = match sqlx::query(
            r"
            SELECT id, name, slug, description, icon, features, created_at
            FROM services
            ",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Service listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_service).collect()
    }

    /// Get a service by its unique slug
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to `None`
    pub async fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>> {
        let row = match sqlx::query(
            r"
            SELECT id, name, slug, description, icon, features, created_at
            FROM services WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(row) => row,
            Err(e) => {
                warn!("Service lookup unavailable: {e}");
                return Ok(None);
            }
        };

        row.as_ref().map(Self::row_to_service).transpose()
    }

    fn row_to_portfolio_item(row: &sqlx::sqlite::SqliteRow) -> Result<PortfolioItem> {
        Ok(PortfolioItem {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            category: row.get("category"),
            image_url: row.get("image_url"),
            result_metric: row.get("result_metric"),
            result_description: row.get("result_description"),
            client_name: row.get("client_name"),
            featured: row.get("featured"),
            created_at: row.get("created_at"),
        })
    }

    fn row_to_service(row: &sqlx::sqlite::SqliteRow) -> Result<Service> {
        let features: Option<String> = row.get("features");

        Ok(Service {
            id: row.get("id"),
            name: row.get("name"),
            slug: row.get("slug"),
            description: row.get("description"),
            icon: row.get("icon"),
            features: features
                .map(|raw| serde_json::from_str(&raw))
                .transpose()
                .context("Failed to parse stored service features")?,
            created_at: row.get("created_at"),
        })
    }
}
