// ABOUTME: Budget-request database operations
// ABOUTME: Public insert path, admin listing, and the quote status mutation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use super::Database;
use crate::models::{Budget, BudgetStatus, NewBudget};
use anyhow::{Context, Result};
use sqlx::Row;
use tracing::warn;

impl Database {
    /// Create the budgets table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_budgets(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id INTEGER REFERENCES clients(id),
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                company TEXT NOT NULL,
                services TEXT NOT NULL,
                budget TEXT,
                timeline TEXT,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'quoted', 'accepted', 'rejected')),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                quoted_at DATETIME,
                quoted_price REAL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_budgets_client_id ON budgets(client_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a budget submission
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn create_budget(&self, budget: &NewBudget) -> Result<i64> {
        let services = serde_json::to_string(&budget.services)
            .context("Failed to serialize requested services")?;

        let result = sqlx::query(
            r"
            INSERT INTO budgets (name, email, company, services, budget, timeline, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&budget.name)
        .bind(&budget.email)
        .bind(&budget.company)
        .bind(services)
        .bind(&budget.budget)
        .bind(&budget.timeline)
        .bind(&budget.description)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all budget requests, newest first
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        let rows = match sqlx::query(
            r"
            SELECT id, client_id, name, email, company, services, budget, timeline,
                   description, status, created_at, quoted_at, quoted_price
            FROM budgets ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Budget listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_budget).collect()
    }

    /// Get a budget request by id
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to `None`
    pub async fn get_budget_by_id(&self, id: i64) -> Result<Option<Budget>> {
        let row = match sqlx::query(
            r"
            SELECT id, client_id, name, email, company, services, budget, timeline,
                   description, status, created_at, quoted_at, quoted_price
            FROM budgets WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(row) => row,
            Err(e) => {
                warn!("Budget lookup unavailable: {e}");
                return Ok(None);
            }
        };

        row.as_ref().map(Self::row_to_budget).transpose()
    }

    /// List budget requests linked to a client, newest first
    ///
    /// # Errors
    ///
    /// Returns an error only if row decoding fails; an unavailable
    /// database degrades to an empty list
    pub async fn get_budgets_by_client_id(&self, client_id: i64) -> Result<Vec<Budget>> {
        let rows = match sqlx::query(
            r"
            SELECT id, client_id, name, email, company, services, budget, timeline,
                   description, status, created_at, quoted_at, quoted_price
            FROM budgets WHERE client_id = $1 ORDER BY created_at DESC
            ",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Budget listing unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        rows.iter().map(Self::row_to_budget).collect()
    }

    /// Update a budget request's status. When the status moves to
    /// `quoted` with a price, the price and quote timestamp are set in
    /// the same statement; otherwise neither changes.
    ///
    /// Returns whether a row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (write paths fail hard)
    pub async fn update_budget_status(
        &self,
        id: i64,
        status: BudgetStatus,
        quoted_price: Option<f64>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE budgets SET
                status = $2,
                quoted_price = CASE WHEN $2 = 'quoted' AND $3 IS NOT NULL THEN $3
                                    ELSE quoted_price END,
                quoted_at = CASE WHEN $2 = 'quoted' AND $3 IS NOT NULL THEN CURRENT_TIMESTAMP
                                 ELSE quoted_at END
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(quoted_price)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_budget(row: &sqlx::sqlite::SqliteRow) -> Result<Budget> {
        let status: String = row.get("status");
        let services: String = row.get("services");

        Ok(Budget {
            id: row.get("id"),
            client_id: row.get("client_id"),
            name: row.get("name"),
            email: row.get("email"),
            company: row.get("company"),
            services: serde_json::from_str(&services)
                .context("Failed to parse stored services list")?,
            budget: row.get("budget"),
            timeline: row.get("timeline"),
            description: row.get("description"),
            status: status.parse()?,
            created_at: row.get("created_at"),
            quoted_at: row.get("quoted_at"),
            quoted_price: row.get("quoted_price"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{BudgetStatus, NewBudget};

    fn sample_budget(name: &str) -> NewBudget {
        NewBudget {
            name: name.into(),
            email: format!("{name}@example.com"),
            company: "Acme".into(),
            services: vec!["seo".into(), "ads".into()],
            budget: Some("5000-10000".into()),
            timeline: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_services() {
        let db = create_test_db().await.unwrap();
        let id = db.create_budget(&sample_budget("kim")).await.unwrap();

        let budget = db.get_budget_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.services, vec!["seo".to_string(), "ads".to_string()]);
        assert_eq!(budget.status, BudgetStatus::Pending);
        assert!(budget.quoted_at.is_none());
        assert!(budget.quoted_price.is_none());
    }

    #[tokio::test]
    async fn test_quote_sets_price_and_timestamp_together() {
        let db = create_test_db().await.unwrap();
        let id = db.create_budget(&sample_budget("kim")).await.unwrap();

        assert!(db
            .update_budget_status(id, BudgetStatus::Quoted, Some(7500.0))
            .await
            .unwrap());

        let budget = db.get_budget_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.status, BudgetStatus::Quoted);
        assert_eq!(budget.quoted_price, Some(7500.0));
        assert!(budget.quoted_at.is_some());
    }

    #[tokio::test]
    async fn test_quote_without_price_sets_neither() {
        let db = create_test_db().await.unwrap();
        let id = db.create_budget(&sample_budget("kim")).await.unwrap();

        db.update_budget_status(id, BudgetStatus::Quoted, None)
            .await
            .unwrap();

        let budget = db.get_budget_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.status, BudgetStatus::Quoted);
        assert!(budget.quoted_price.is_none());
        assert!(budget.quoted_at.is_none());
    }

    #[tokio::test]
    async fn test_non_quote_status_leaves_quote_fields() {
        let db = create_test_db().await.unwrap();
        let id = db.create_budget(&sample_budget("kim")).await.unwrap();

        db.update_budget_status(id, BudgetStatus::Quoted, Some(1200.0))
            .await
            .unwrap();
        db.update_budget_status(id, BudgetStatus::Accepted, None)
            .await
            .unwrap();

        let budget = db.get_budget_by_id(id).await.unwrap().unwrap();
        assert_eq!(budget.status, BudgetStatus::Accepted);
        assert_eq!(budget.quoted_price, Some(1200.0));
        assert!(budget.quoted_at.is_some());
    }
}
