// ABOUTME: Performance report database operations
// ABOUTME: Per-client report listing and insertion with JSON metric storage
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{NewReport, Report};
use anyhow::{Context, Result};
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the reports table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_reports(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id INTEGER NOT NULL REFERENCES clients(id),
                title TEXT NOT NULL,
                month TEXT,
                metrics TEXT NOT NULL,
                summary TEXT,
                attachment_url TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_reports_client_id ON reports(client_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a report for a client
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_report(&self, report: &NewReport) -> Result<i64> {
        let metrics =
            serde_json::to_string(&report.metrics).context("Failed to serialize report metrics")?;

        let result = sqlx::query(
            r"
            INSERT INTO reports (client_id, title, month, metrics, summary, attachment_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(report.client_id)
        .bind(&report.title)
        .bind(&report.month)
        .bind(metrics)
        .bind(&report.summary)
        .bind(&report.attachment_url)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List a client's reports, newest first
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_reports_by_client_id(&self, client_id: i64) -> Result<Vec<Report>> {
        let rows = match sqlx::query(
            r"
            SELECT id, client_id, title, month, metrics, summary, attachment_url, created_at
            FROM reports WHERE client_id = $1 ORDER BY created_at DESC
            ",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Report listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_report).collect()
    }

    fn row_to_report(row: &sqlx::sqlite::SqliteRow) -> Result<Report> {
        let metrics: String = row.get("metrics");

        Ok(Report {
            id: row.get("id"),
            client_id: row.get("client_id"),
            title: row.get("title"),
            month: row.get("month"),
            metrics: serde_json::from_str(&metrics)
                .context("Failed to parse stored report metrics")?,
            summary: row.get("summary"),
            attachment_url: row.get("attachment_url"),
            created_at: row.get("created_at"),
        })
    }
}
